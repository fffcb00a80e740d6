/*
 * Responsibility
 * - GET /reviews/{id}     reviews of one bag (public)
 * - GET /reviews?email=   a reviewer's own reviews (guarded; email must be the caller's)
 * - POST /reviews goes through the generic create
 */
use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    api::{
        dto::{envelope::Envelope, resources::EmailQuery},
        extractors::{AuthCtxExtractor, Resource, doc_id::Reviews},
    },
    error::AppError,
    repos::{Document, Filter},
    state::AppState,
};

/// Field on a review naming the reviewed bag (by convention only).
pub const BAG_FIELD: &str = "bag_id";
pub const EMAIL_FIELD: &str = "email";

pub async fn by_bag(
    State(state): State<AppState>,
    Path(bag_id): Path<String>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let filter = Filter::all().eq(BAG_FIELD, bag_id);
    let docs = state.store.find(Reviews::COLLECTION, &filter, None).await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

pub async fn by_email(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let Some(email) = query.email.filter(|e| *e == ctx.email) else {
        tracing::warn!(caller = %ctx.email, "reviews requested for another reviewer");
        return Err(AppError::Forbidden);
    };

    let filter = Filter::all().eq(EMAIL_FIELD, email);
    let docs = state.store.find(Reviews::COLLECTION, &filter, None).await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    api::{
        dto::{envelope::Envelope, resources::EmailQuery},
        extractors::{Resource, doc_id::Cart},
    },
    error::AppError,
    repos::{Document, Filter},
    state::AppState,
};

pub const EMAIL_FIELD: &str = "email";

/// `GET /cart[?email=]`: every cart item, or one shopper's items.
pub async fn list_cart(
    State(state): State<AppState>,
    Query(query): Query<EmailQuery>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let filter = match query.email.filter(|e| !e.trim().is_empty()) {
        Some(email) => Filter::all().eq(EMAIL_FIELD, email),
        None => Filter::all(),
    };
    let docs = state.store.find(Cart::COLLECTION, &filter, None).await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

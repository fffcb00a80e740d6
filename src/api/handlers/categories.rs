use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    api::{
        dto::envelope::Envelope,
        extractors::{Resource, doc_id::Products},
    },
    error::AppError,
    repos::{Document, Filter},
    state::AppState,
};

/// Field on a product naming its category.
pub const CATEGORY_FIELD: &str = "category_id";

/// `GET /categories/{id}`: products filed under that category.
///
/// `category_id` is free-form client data ("men", a document id, ...), so the
/// path segment is matched as-is and an unknown category yields an empty list.
pub async fn products_in_category(
    State(state): State<AppState>,
    Path(category_id): Path<String>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let filter = Filter::all().eq(CATEGORY_FIELD, category_id);
    let docs = state.store.find(Products::COLLECTION, &filter, None).await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

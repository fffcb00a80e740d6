/*
 * Responsibility
 * - CRUD handlers shared by every collection (bags, products, foods, categories, cart, reviews)
 * - One storage call per handler; R picks the collection and the wording
 * - Whether a route needs the auth guard is decided in routes.rs, not here
 */
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

use crate::{
    api::{
        dto::{
            envelope::Envelope,
            resources::{Created, ListQuery},
        },
        extractors::{DocId, JsonObject, Resource},
    },
    error::AppError,
    repos::{Document, Filter},
    state::AppState,
};

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Envelope<Created>>), AppError> {
    let doc = state.store.insert(R::COLLECTION, body).await?;

    tracing::info!(collection = R::COLLECTION, id = %doc.id, "document created");
    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(
            format!("Successfully added your {}", R::LABEL),
            Created { id: doc.id },
        )),
    ))
}

/// Plain list: capped by `?limit=` or the resource default.
pub async fn list<R: Resource>(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let limit = query.effective_limit(R::DEFAULT_LIMIT);
    let docs = state
        .store
        .find(R::COLLECTION, &Filter::all(), limit)
        .await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

/// Uncapped list (`/allbags`, `/allfoods`, ...).
pub async fn list_all<R: Resource>(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let docs = state.store.find(R::COLLECTION, &Filter::all(), None).await?;

    Ok(Json(Envelope::ok("Successfully got the data", docs)))
}

pub async fn get_one<R: Resource>(
    State(state): State<AppState>,
    doc_id: DocId<R>,
) -> Result<Json<Envelope<Document>>, AppError> {
    let doc = state
        .store
        .get(R::COLLECTION, doc_id.id)
        .await?
        .ok_or(AppError::not_found(R::LABEL))?;

    Ok(Json(Envelope::ok("Successfully got the data", doc)))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    doc_id: DocId<R>,
    JsonObject(patch): JsonObject,
) -> Result<Json<Envelope<()>>, AppError> {
    if patch.is_empty() {
        return Err(AppError::bad_request("EMPTY_UPDATE", "no fields to update"));
    }

    let matched = state.store.update(R::COLLECTION, doc_id.id, patch).await?;
    if !matched {
        return Err(AppError::not_found(R::LABEL));
    }

    Ok(Json(Envelope::message(format!(
        "Successfully updated the {}",
        R::LABEL
    ))))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    doc_id: DocId<R>,
) -> Result<Json<Envelope<()>>, AppError> {
    let deleted = state.store.delete(R::COLLECTION, doc_id.id).await?;
    if !deleted {
        return Err(AppError::not_found(R::LABEL));
    }

    tracing::info!(collection = R::COLLECTION, id = %doc_id.id, "document deleted");
    Ok(Json(Envelope::message(format!(
        "Successfully deleted the {}",
        R::LABEL
    ))))
}

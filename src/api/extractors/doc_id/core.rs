/*
 * Responsibility
 * - `Resource`: what a tag type must say about its collection
 * - `DocId<R>`: path `{id}` parsed as a document id for resource R
 * - An id that cannot be parsed can never match a document, so it is reported as NotFound
 *
 * Keep out of here
 * - Concrete resource names (types.rs)
 */
use std::marker::PhantomData;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use uuid::Uuid;

use crate::error::AppError;

/// A storefront collection exposed through the generic resource handlers.
pub trait Resource: Send + Sync + 'static {
    /// Storage collection name.
    const COLLECTION: &'static str;
    /// Singular, human-facing name used in messages ("bag", "food", ...).
    const LABEL: &'static str;
    /// Cap applied to plain list routes when the client gives no `?limit=`.
    const DEFAULT_LIMIT: Option<i64> = None;
}

pub struct DocId<R> {
    pub id: Uuid,
    _marker: PhantomData<R>,
}

impl<R> Clone for DocId<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for DocId<R> {}

impl<R> DocId<R> {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

pub fn parse_doc_id<R: Resource>(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::not_found(R::LABEL))
}

impl<R, S> FromRequestParts<S> for DocId<R>
where
    R: Resource,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(R::LABEL))?;
        Ok(Self::new(parse_doc_id::<R>(&raw)?))
    }
}

impl<R> std::fmt::Debug for DocId<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocId").field("id", &self.id).finish()
    }
}

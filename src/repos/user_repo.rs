/*
 * Responsibility
 * - users collection operations on top of DocumentStore
 * - email is the natural key (unique index / memory unique field)
 * - role only ever moves to "admin"; nothing here removes it
 */
use serde_json::Value;
use uuid::Uuid;

use crate::repos::error::RepoResult;
use crate::repos::store::{Document, DocumentStore, Fields, Filter, Upserted};

pub const COLLECTION: &str = "users";
pub const EMAIL_FIELD: &str = "email";
pub const ROLE_FIELD: &str = "role";
pub const ADMIN_ROLE: &str = "admin";

pub async fn list(db: &dyn DocumentStore) -> RepoResult<Vec<Document>> {
    db.find(COLLECTION, &Filter::all(), None).await
}

pub async fn find_by_email(db: &dyn DocumentStore, email: &str) -> RepoResult<Option<Document>> {
    db.find_one(COLLECTION, &Filter::all().eq(EMAIL_FIELD, email))
        .await
}

/// Create the user, or merge `fields` into the existing user with that email.
///
/// `fields` must not carry `role`; callers decide whether to grant it.
pub async fn upsert_by_email(
    db: &dyn DocumentStore,
    email: &str,
    fields: Fields,
) -> RepoResult<Upserted> {
    db.upsert(COLLECTION, &Filter::all().eq(EMAIL_FIELD, email), fields)
        .await
}

/// Set role = "admin" on an existing user. Never creates a document.
///
/// Returns `false` when no user has that id.
pub async fn set_admin(db: &dyn DocumentStore, user_id: Uuid) -> RepoResult<bool> {
    let mut patch = Fields::new();
    patch.insert(ROLE_FIELD.to_string(), Value::from(ADMIN_ROLE));
    db.update(COLLECTION, user_id, patch).await
}

pub fn is_admin(user: &Document) -> bool {
    user.get_str(ROLE_FIELD) == Some(ADMIN_ROLE)
}

//! Document store interface used by every resource repo.
//!
//! Documents are schemaless JSON objects grouped into named collections. The
//! store owns `_id` generation; a client-supplied `_id` never reaches storage.
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::repos::error::RepoResult;

/// Reserved key under which the document id is exposed.
pub const ID_FIELD: &str = "_id";

pub type Fields = Map<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub body: Fields,
}

impl Document {
    pub fn new(id: Uuid, body: Fields) -> Self {
        Self {
            id,
            body: strip_id(body),
        }
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(Value::as_str)
    }
}

/// Top-level equality filter. An empty filter matches every document.
#[derive(Debug, Clone, Default)]
pub struct Filter(Fields);

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.0.insert(field.to_string(), value.into());
        self
    }

    pub fn matches(&self, body: &Fields) -> bool {
        self.0.iter().all(|(k, v)| body.get(k) == Some(v))
    }

    pub fn as_fields(&self) -> &Fields {
        &self.0
    }
}

/// Outcome of `DocumentStore::upsert`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Upserted {
    pub id: Uuid,
    /// `true` when no document matched and a new one was inserted.
    pub inserted: bool,
}

/// Storage collaborator shared by all in-flight requests.
///
/// Implementations must be safe for concurrent use; the process holds exactly
/// one instance behind an `Arc` and calls `close` once after shutdown.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    // Backend name (for logging).
    fn backend_name(&self) -> &'static str;

    async fn insert(&self, collection: &str, body: Fields) -> RepoResult<Document>;

    // Documents in insertion order. `limit: None` means uncapped.
    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Document>>;

    async fn find_one(&self, collection: &str, filter: &Filter) -> RepoResult<Option<Document>> {
        Ok(self
            .find(collection, filter, Some(1))
            .await?
            .into_iter()
            .next())
    }

    async fn get(&self, collection: &str, id: Uuid) -> RepoResult<Option<Document>>;

    // Merge `patch` into the document's top-level fields.
    //
    // Returns:
    // - `Ok(true)`  if a document matched
    // - `Ok(false)` if nothing has that id (nothing is created)
    async fn update(&self, collection: &str, id: Uuid, patch: Fields) -> RepoResult<bool>;

    async fn delete(&self, collection: &str, id: Uuid) -> RepoResult<bool>;

    // Merge `body` into the first document matching `filter`, or insert
    // `filter ∪ body` when nothing matches.
    async fn upsert(&self, collection: &str, filter: &Filter, body: Fields)
    -> RepoResult<Upserted>;

    async fn close(&self);
}

pub(crate) fn strip_id(mut body: Fields) -> Fields {
    body.remove(ID_FIELD);
    body
}

/// Body stored by an upsert that inserts: the filter's equality fields win.
pub(crate) fn upsert_body(filter: &Filter, body: Fields) -> Fields {
    let mut merged = strip_id(body);
    for (k, v) in filter.as_fields() {
        merged.insert(k.clone(), v.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(v: Value) -> Fields {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn document_serializes_id_next_to_body() {
        let id = Uuid::new_v4();
        let doc = Document::new(id, fields(json!({"_id": "spoofed", "name": "tote"})));

        let v = serde_json::to_value(&doc).unwrap();
        assert_eq!(v, json!({"_id": id.to_string(), "name": "tote"}));
    }

    #[test]
    fn filter_matches_on_every_field() {
        let body = fields(json!({"email": "a@x.com", "bag_id": "42"}));

        assert!(Filter::all().matches(&body));
        assert!(Filter::all().eq("email", "a@x.com").matches(&body));
        assert!(
            !Filter::all()
                .eq("email", "a@x.com")
                .eq("bag_id", "7")
                .matches(&body)
        );
        assert!(!Filter::all().eq("missing", "x").matches(&body));
    }

    #[test]
    fn upsert_body_prefers_filter_fields() {
        let filter = Filter::all().eq("email", "a@x.com");
        let merged = upsert_body(&filter, fields(json!({"email": "b@x.com", "name": "A"})));

        assert_eq!(Value::Object(merged), json!({"email": "a@x.com", "name": "A"}));
    }
}

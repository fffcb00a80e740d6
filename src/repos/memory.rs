use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::store::{
    Document, DocumentStore, Fields, Filter, Upserted, strip_id, upsert_body,
};

/// In-process document store.
///
/// Intended for tests/dev. Collections keep insertion order; unique fields
/// registered with `with_unique` behave like the Postgres unique indexes.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
    unique: Vec<(String, String)>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unique(mut self, collection: &str, field: &str) -> Self {
        self.unique.push((collection.to_string(), field.to_string()));
        self
    }

    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, Vec::len)
    }

    // Reject `body` if it would share a unique field value with a document other than `skip`.
    fn check_unique(
        &self,
        collection: &str,
        docs: &[Document],
        body: &Fields,
        skip: Option<Uuid>,
    ) -> RepoResult<()> {
        for (_, field) in self.unique.iter().filter(|(c, _)| c == collection) {
            let Some(value) = body.get(field).filter(|v| !v.is_null()) else {
                continue;
            };
            let taken = docs
                .iter()
                .filter(|d| Some(d.id) != skip)
                .any(|d| d.body.get(field) == Some(value));
            if taken {
                return Err(RepoError::Conflict);
            }
        }
        Ok(())
    }
}

fn merge(target: &mut Fields, patch: Fields) {
    for (k, v) in strip_id(patch) {
        target.insert(k, v);
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn insert(&self, collection: &str, body: Fields) -> RepoResult<Document> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        let doc = Document::new(Uuid::new_v4(), body);
        self.check_unique(collection, docs, &doc.body, None)?;
        docs.push(doc.clone());

        Ok(doc)
    }

    async fn find(
        &self,
        collection: &str,
        filter: &Filter,
        limit: Option<i64>,
    ) -> RepoResult<Vec<Document>> {
        let collections = self.collections.read().await;
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let limit = limit
            .and_then(|l| usize::try_from(l).ok())
            .unwrap_or(usize::MAX);

        Ok(docs
            .iter()
            .filter(|d| filter.matches(&d.body))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get(&self, collection: &str, id: Uuid) -> RepoResult<Option<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn update(&self, collection: &str, id: Uuid, patch: Fields) -> RepoResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };
        let Some(pos) = docs.iter().position(|d| d.id == id) else {
            return Ok(false);
        };

        let mut merged = docs[pos].body.clone();
        merge(&mut merged, patch);
        self.check_unique(collection, docs, &merged, Some(id))?;
        docs[pos].body = merged;

        Ok(true)
    }

    async fn delete(&self, collection: &str, id: Uuid) -> RepoResult<bool> {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return Ok(false);
        };

        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn upsert(
        &self,
        collection: &str,
        filter: &Filter,
        body: Fields,
    ) -> RepoResult<Upserted> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if let Some(pos) = docs.iter().position(|d| filter.matches(&d.body)) {
            let id = docs[pos].id;
            let mut merged = docs[pos].body.clone();
            merge(&mut merged, body);
            self.check_unique(collection, docs, &merged, Some(id))?;
            docs[pos].body = merged;
            return Ok(Upserted {
                id,
                inserted: false,
            });
        }

        let doc = Document::new(Uuid::new_v4(), upsert_body(filter, body));
        self.check_unique(collection, docs, &doc.body, None)?;
        let id = doc.id;
        docs.push(doc);

        Ok(Upserted { id, inserted: true })
    }

    async fn close(&self) {
        let dropped: usize = self.collections.read().await.values().map(Vec::len).sum();
        tracing::debug!(documents = dropped, "memory store closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn fields(v: Value) -> Fields {
        match v {
            Value::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    fn store() -> MemoryDocumentStore {
        MemoryDocumentStore::new().with_unique("users", "email")
    }

    #[tokio::test]
    async fn insert_then_get_round_trips_body() {
        let store = store();
        let doc = store
            .insert("bags", fields(json!({"_id": "client", "name": "tote"})))
            .await
            .unwrap();

        let got = store.get("bags", doc.id).await.unwrap().unwrap();
        assert_eq!(got.body, fields(json!({"name": "tote"})));
        assert_eq!(store.count("bags").await, 1);
    }

    #[tokio::test]
    async fn find_respects_filter_order_and_limit() {
        let store = store();
        for n in 0..5 {
            store
                .insert("reviews", fields(json!({"bag_id": "a", "n": n})))
                .await
                .unwrap();
        }
        store
            .insert("reviews", fields(json!({"bag_id": "b"})))
            .await
            .unwrap();

        let filter = Filter::all().eq("bag_id", "a");
        let docs = store.find("reviews", &filter, Some(3)).await.unwrap();
        let ns: Vec<_> = docs.iter().map(|d| d.body["n"].clone()).collect();
        assert_eq!(ns, vec![json!(0), json!(1), json!(2)]);

        let all = store.find("reviews", &Filter::all(), None).await.unwrap();
        assert_eq!(all.len(), 6);
    }

    #[tokio::test]
    async fn update_merges_and_reports_match() {
        let store = store();
        let doc = store
            .insert("foods", fields(json!({"name": "soup", "price": 3})))
            .await
            .unwrap();

        assert!(
            store
                .update("foods", doc.id, fields(json!({"price": 4})))
                .await
                .unwrap()
        );
        let got = store.get("foods", doc.id).await.unwrap().unwrap();
        assert_eq!(got.body, fields(json!({"name": "soup", "price": 4})));

        assert!(
            !store
                .update("foods", Uuid::new_v4(), fields(json!({"price": 1})))
                .await
                .unwrap()
        );
        assert_eq!(store.count("foods").await, 1);
    }

    #[tokio::test]
    async fn delete_reports_removal() {
        let store = store();
        let doc = store.insert("cart", Fields::new()).await.unwrap();

        assert!(store.delete("cart", doc.id).await.unwrap());
        assert!(!store.delete("cart", doc.id).await.unwrap());
    }

    #[tokio::test]
    async fn unique_field_conflicts_on_insert() {
        let store = store();
        store
            .insert("users", fields(json!({"email": "a@x.com"})))
            .await
            .unwrap();

        let err = store
            .insert("users", fields(json!({"email": "a@x.com"})))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Conflict));

        // Not unique outside the registered collection.
        store
            .insert("cart", fields(json!({"email": "a@x.com"})))
            .await
            .unwrap();
        store
            .insert("cart", fields(json!({"email": "a@x.com"})))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn upsert_inserts_once_then_merges() {
        let store = store();
        let filter = Filter::all().eq("email", "a@x.com");

        let first = store
            .upsert("users", &filter, fields(json!({"name": "A"})))
            .await
            .unwrap();
        assert!(first.inserted);

        let second = store
            .upsert("users", &filter, fields(json!({"photo": "p.png"})))
            .await
            .unwrap();
        assert!(!second.inserted);
        assert_eq!(first.id, second.id);

        let doc = store.get("users", first.id).await.unwrap().unwrap();
        assert_eq!(
            doc.body,
            fields(json!({"email": "a@x.com", "name": "A", "photo": "p.png"}))
        );
        assert_eq!(store.count("users").await, 1);
    }
}

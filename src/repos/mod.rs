pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;
pub mod user_repo;

pub use error::{RepoError, RepoResult};
pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;
pub use store::{Document, DocumentStore, Fields, Filter, Upserted};

/// Fields that must be unique within a collection (mirrors the unique indexes in `migrations/`).
pub const UNIQUE_FIELDS: &[(&str, &str)] = &[(user_repo::COLLECTION, user_repo::EMAIL_FIELD)];

/// Memory store with the same unique constraints as the Postgres schema.
pub fn memory_store() -> MemoryDocumentStore {
    UNIQUE_FIELDS
        .iter()
        .fold(MemoryDocumentStore::new(), |store, (collection, field)| {
            store.with_unique(collection, field)
        })
}

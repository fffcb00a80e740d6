pub mod auth_ctx;
pub mod doc_id;
pub mod json_object;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use doc_id::{DocId, Resource};
pub use json_object::JsonObject;

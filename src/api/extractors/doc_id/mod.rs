/*
 * Responsibility
 *  - Bundle core and types
 *  - Control what handlers/routes can see
 */
mod core;
mod types;

pub use self::core::{DocId, Resource, parse_doc_id};
pub use types::*;

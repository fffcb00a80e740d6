/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - Give handlers the verified caller (AuthCtx)
 * - axum-specific code stays in core, the type itself in types
 *
 * Public API:
 * - AuthCtx
 * - AuthCtxExtractor
 */

mod core;
mod types;

pub use self::core::AuthCtxExtractor;
pub use types::AuthCtx;

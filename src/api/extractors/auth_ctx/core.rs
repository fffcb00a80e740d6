use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::AuthCtx;

/// Extractor that hands `AuthCtx` to a handler.
///
/// The access middleware must have inserted `AuthCtx` into request extensions.
/// Missing means the handler is mounted outside the guarded router: a wiring bug,
/// reported as 500 rather than treated as an anonymous caller.
pub struct AuthCtxExtractor(pub AuthCtx);

impl<S> FromRequestParts<S> for AuthCtxExtractor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<AuthCtx>() {
            Some(ctx) => Ok(AuthCtxExtractor(ctx.clone())),
            None => {
                tracing::error!(
                    path = %parts.uri.path(),
                    "AuthCtx requested on a route without the access middleware"
                );
                Err(AppError::Internal)
            }
        }
    }
}

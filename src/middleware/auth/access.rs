//! Access token guard: `Authorization: Bearer <jwt>` -> `AuthCtx` in request extensions.
//!
//! - No Authorization header at all: 401
//! - Header present but not a usable bearer token, or the token fails verification: 403
//!
//! Handlers behind the guard read the caller through `AuthCtxExtractor`.

use axum::{
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::api::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// Put the guard in front of the methods registered on `route`.
///
/// `MethodRouter::route_layer` leaves the method fallback unwrapped, so a
/// guarded route merged with public methods still answers 405 (not 401) for
/// methods neither side handles.
pub fn apply(route: MethodRouter<AppState>, state: AppState) -> MethodRouter<AppState> {
    // axum 0.8 middleware::from_fn can't take State, so pass it explicitly
    route.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(auth) = req.headers().get(header::AUTHORIZATION) else {
        tracing::debug!(path = %req.uri().path(), "missing authorization header");
        return Err(AppError::Unauthorized);
    };

    let token = auth
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or(AppError::Forbidden)?;

    // signature/exp are checked by AuthService (failures are logged there)
    let verified = state
        .auth
        .verify(token)
        .map_err(|_| AppError::Forbidden)?;

    req.extensions_mut()
        .insert(AuthCtx::new(verified.email, verified.expires_at));

    Ok(next.run(req).await)
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }

    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::bearer_token;

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer  abc "), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("abc"), None);
    }
}

//! CORS for the storefront's browser clients.
//!
//! - development: any origin
//! - production: exact-match allowlist from `CORS_ALLOWED_ORIGINS`; an empty list allows none
//!
//! Credentials are never allowed; the bearer token travels in a header.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(600);

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let base = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| HeaderValue::from_str(origin).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::predicate(move |origin: &HeaderValue, _| {
            allowed.contains(origin)
        }))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    base.allow_methods([
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
        Method::OPTIONS,
    ])
    .allow_headers([
        header::AUTHORIZATION,
        header::CONTENT_TYPE,
        header::ACCEPT,
        HeaderName::from_static("x-request-id"),
    ])
    .max_age(PREFLIGHT_MAX_AGE)
}

//! Transport-level layers applied to every route.
//!
//! - `x-request-id`: generated when absent, echoed on the response
//! - access log via `TraceLayer`
//! - body limit (storefront documents are small JSON objects)
//! - per-request timeout from `REQUEST_TIMEOUT_SECONDS`; elapsed requests get 408

use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::dto::envelope::Envelope;
use crate::config::Config;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub fn apply(router: Router, config: &Config) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let layers = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(handle_layer_error))
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_seconds,
        )))
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}

async fn handle_layer_error(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        return (
            StatusCode::REQUEST_TIMEOUT,
            Json(Envelope::<()>::failure("TIMEOUT", "request timed out")),
        )
            .into_response();
    }

    tracing::error!(error = %err, "unhandled middleware error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::<()>::failure("INTERNAL", "internal server error")),
    )
        .into_response()
}

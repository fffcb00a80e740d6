/*
 * Responsibility
 * - GET /       (plain-text liveness, what the storefront pings)
 * - GET /health (JSON, for probes)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn liveness() -> &'static str {
    "bezzelo server is running"
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde_json::Value;

use crate::error::AppError;
use crate::repos::Fields;

/// Request body that must be a JSON object (a document or a partial field set).
///
/// Rejections use the error envelope instead of axum's plain-text body.
#[derive(Debug)]
pub struct JsonObject(pub Fields);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request("INVALID_BODY", rejection.body_text()))?;

        match value {
            Value::Object(fields) => Ok(Self(fields)),
            _ => Err(AppError::bad_request(
                "INVALID_BODY",
                "request body must be a JSON object",
            )),
        }
    }
}

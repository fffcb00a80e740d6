/*
 * Responsibility
 * - App-wide AppError
 * - IntoResponse: HTTP status reflects the outcome, body is the error envelope
 * - RepoError / TokenError are converted here so handlers can use `?`
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::api::dto::envelope::Envelope;
use crate::repos::error::RepoError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("{code}: {message}")]
    Conflict { code: &'static str, message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }

    pub fn conflict(code: &'static str, message: impl Into<String>) -> Self {
        Self::Conflict {
            code,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::Unauthorized => ("UNAUTHORIZED", "unauthorized access".into()),
            AppError::Forbidden => ("FORBIDDEN", "forbidden access".into()),
            AppError::NotFound { resource } => ("NOT_FOUND", format!("{resource} not found.")),
            AppError::Conflict { code, message } => (code, message),
            AppError::Internal => ("INTERNAL", "internal server error".into()),
        };

        (status, Json(Envelope::<()>::failure(code, message))).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => {
                AppError::conflict("DUPLICATE_KEY", "a document with that key already exists")
            }
            RepoError::Db(e) => {
                tracing::error!(error = %e, "storage operation failed");
                AppError::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_outcome() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::not_found("bag").status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(RepoError::Conflict).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::from(RepoError::Db(sqlx::Error::PoolClosed)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}

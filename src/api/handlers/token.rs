use axum::Json;
use axum::extract::{Query, State};

use crate::api::dto::token::{TokenQuery, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /jwt?email=`: exchange a known email for an access token.
pub async fn issue_token(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<TokenResponse>, AppError> {
    let email = query
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| AppError::bad_request("EMAIL_REQUIRED", "email query parameter is required"))?;

    let out = state.auth.issue_for_email(state.store.as_ref(), email).await?;

    Ok(Json(TokenResponse {
        access_token: out.access_token,
        token_type: out.token_type.to_string(),
        expires_in: out.expires_in,
    }))
}

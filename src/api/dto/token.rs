use serde::{Deserialize, Serialize};

/// Query for `GET /jwt?email=`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenQuery {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until expiry.
    pub expires_in: u64,
}

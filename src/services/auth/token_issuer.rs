use tracing::{debug, warn};

use crate::error::AppError;
use crate::repos::{DocumentStore, user_repo};
use crate::services::auth::jwt::{JwtKeys, TokenError};

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}

/// What a verified access token tells the rest of the app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifiedAccessToken {
    pub email: String,
    pub expires_at: i64,
}

#[derive(Clone, Debug)]
pub struct AuthService {
    jwt: JwtKeys,
}

impl AuthService {
    pub fn new(jwt: JwtKeys) -> Self {
        Self { jwt }
    }

    /// Issue a token for an existing user.
    ///
    /// - Read-only: the user is looked up, never created.
    /// - Unknown email is always `NotFound`.
    pub async fn issue_for_email(
        &self,
        db: &dyn DocumentStore,
        email: &str,
    ) -> Result<IssuedToken, AppError> {
        let user = user_repo::find_by_email(db, email).await?;
        if user.is_none() {
            debug!("token requested for unknown user");
            return Err(AppError::not_found("user"));
        }

        let access_token = self
            .jwt
            .sign(email, chrono::Utc::now().timestamp())
            .map_err(|_| AppError::Internal)?;

        Ok(IssuedToken {
            access_token,
            token_type: "Bearer",
            expires_in: self.jwt.ttl_seconds(),
        })
    }

    /// Verify a bearer token (signature + expiry) and return the caller.
    pub fn verify(&self, token: &str) -> Result<VerifiedAccessToken, TokenError> {
        let claims = self.jwt.verify(token).inspect_err(|err| {
            warn!(error = %err, "access token verification failed");
        })?;

        Ok(VerifiedAccessToken {
            email: claims.email,
            expires_at: claims.exp,
        })
    }
}

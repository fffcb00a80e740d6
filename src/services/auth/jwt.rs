use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// Access token claims. Only `email` identifies the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenClaims {
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(e),
        }
    }
}

/// HS256 signer/verifier over the server secret.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
}

impl std::fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtKeys")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl JwtKeys {
    pub fn from_secret(secret: &[u8], ttl_seconds: u64, leeway_seconds: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds
    }

    /// Sign a token for `email` issued at `issued_at` (unix seconds).
    pub fn sign(&self, email: &str, issued_at: i64) -> Result<String, TokenError> {
        let claims = AccessTokenClaims {
            email: email.to_string(),
            iat: issued_at,
            exp: issued_at + self.ttl_seconds as i64,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            TokenError::Signing(e)
        })
    }

    /// Check signature + `exp`, then require a non-empty email.
    pub fn verify(&self, token: &str) -> Result<AccessTokenClaims, TokenError> {
        let data = jsonwebtoken::decode::<AccessTokenClaims>(
            token,
            &self.decoding_key,
            &self.validation,
        )?;

        if data.claims.email.trim().is_empty() {
            return Err(TokenError::EmptyClaim("email"));
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: u64 = 86_400;

    fn now() -> i64 {
        chrono::Utc::now().timestamp()
    }

    #[test]
    fn signed_token_verifies_and_carries_email() {
        let keys = JwtKeys::from_secret(b"test-secret", 7 * DAY, 0);
        let issued_at = now();

        let token = keys.sign("a@x.com", issued_at).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iat, issued_at);
        assert_eq!(claims.exp, issued_at + (7 * DAY) as i64);
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = JwtKeys::from_secret(b"test-secret", DAY, 0);

        let token = keys.sign("a@x.com", now() - 2 * DAY as i64).unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let ours = JwtKeys::from_secret(b"test-secret", DAY, 0);
        let theirs = JwtKeys::from_secret(b"other-secret", DAY, 0);

        let token = theirs.sign("a@x.com", now()).unwrap();

        assert!(matches!(ours.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn garbage_is_rejected() {
        let keys = JwtKeys::from_secret(b"test-secret", DAY, 0);

        assert!(matches!(keys.verify("not.a.jwt"), Err(TokenError::Invalid(_))));
        assert!(matches!(keys.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn empty_email_claim_is_rejected() {
        let keys = JwtKeys::from_secret(b"test-secret", DAY, 0);

        let token = keys.sign("  ", now()).unwrap();

        assert!(matches!(keys.verify(&token), Err(TokenError::EmptyClaim("email"))));
    }
}

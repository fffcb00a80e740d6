/*
 * Responsibility
 * - The authenticated-caller type handlers see
 * - Only the access middleware creates it (after verifying the bearer token) and stores it
 *   in request extensions; it lives for that one request
 */

/// Context attached to a request that passed the auth guard.
///
/// - `email` is the token's subject; it is the caller's identity for users/reviews checks
/// - `expires_at` is the token's `exp` (unix seconds), kept for logging
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthCtx {
    pub email: String,
    pub expires_at: i64,
}

impl AuthCtx {
    pub fn new(email: String, expires_at: i64) -> Self {
        Self { email, expires_at }
    }
}

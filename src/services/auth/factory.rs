//! Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AuthService, jwt::JwtKeys};

pub fn build_auth_service(config: &Config) -> Arc<AuthService> {
    let jwt = JwtKeys::from_secret(
        config.access_token_secret.as_bytes(),
        config.access_token_ttl_seconds,
        config.access_token_leeway_seconds,
    );

    Arc::new(AuthService::new(jwt))
}

pub mod factory;
pub mod jwt;
pub mod token_issuer;

pub use factory::build_auth_service;
pub use token_issuer::{AuthService, IssuedToken, VerifiedAccessToken};

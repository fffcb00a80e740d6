/*
 * Responsibility
 * - Users request/response DTO
 * - Signup bodies are free-form; only `email` is required and `role` is never taken from the client
 */
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::repos::{Fields, user_repo};

#[derive(Debug)]
pub struct SignupRequest {
    pub email: String,
    pub fields: Fields,
}

impl SignupRequest {
    pub fn from_body(mut body: Fields) -> Result<Self, &'static str> {
        let email = match body.remove(user_repo::EMAIL_FIELD) {
            Some(Value::String(email)) if !email.trim().is_empty() => email.trim().to_string(),
            Some(_) => return Err("email must be a non-empty string"),
            None => return Err("email is required"),
        };
        body.remove(user_repo::ROLE_FIELD);

        Ok(Self {
            email,
            fields: body,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    #[serde(rename = "_id")]
    pub id: Uuid,
    /// `true` when a new user was created.
    pub upserted: bool,
}

/*
 * Responsibility
 * - GET  /users               list
 * - POST /users               signup (upsert by email)
 * - PUT  /users/admin/{id}    promote to admin (guarded, caller must already be admin)
 */
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use crate::{
    api::{
        dto::{
            envelope::Envelope,
            users::{SignupRequest, SignupResponse},
        },
        extractors::{AuthCtxExtractor, JsonObject, doc_id::Users, doc_id::parse_doc_id},
    },
    error::AppError,
    repos::{Document, user_repo},
    state::AppState,
};

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Document>>>, AppError> {
    let users = user_repo::list(state.store.as_ref()).await?;

    Ok(Json(Envelope::ok("Successfully got the data", users)))
}

pub async fn create_user(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<Envelope<SignupResponse>>), AppError> {
    let SignupRequest { email, mut fields } =
        SignupRequest::from_body(body).map_err(|msg| AppError::bad_request("INVALID_USER", msg))?;

    if state.is_bootstrap_admin(&email) {
        fields.insert(
            user_repo::ROLE_FIELD.to_string(),
            Value::from(user_repo::ADMIN_ROLE),
        );
    }

    let out = user_repo::upsert_by_email(state.store.as_ref(), &email, fields).await?;

    let (status, message) = if out.inserted {
        tracing::info!(user_id = %out.id, "user created");
        (StatusCode::CREATED, "Successfully created the user")
    } else {
        (StatusCode::OK, "Successfully updated the user")
    };

    Ok((
        status,
        Json(Envelope::ok(
            message,
            SignupResponse {
                id: out.id,
                upserted: out.inserted,
            },
        )),
    ))
}

pub async fn make_admin(
    State(state): State<AppState>,
    AuthCtxExtractor(ctx): AuthCtxExtractor,
    Path(raw_id): Path<String>,
) -> Result<Json<Envelope<()>>, AppError> {
    let db = state.store.as_ref();

    // Caller role is checked before the target id is even parsed.
    let caller = user_repo::find_by_email(db, &ctx.email).await?;
    if !caller.as_ref().is_some_and(user_repo::is_admin) {
        tracing::warn!(caller = %ctx.email, "admin promotion refused: caller is not an admin");
        return Err(AppError::Forbidden);
    }

    let target = parse_doc_id::<Users>(&raw_id)?;
    if !user_repo::set_admin(db, target).await? {
        return Err(AppError::not_found("user"));
    }

    tracing::info!(caller = %ctx.email, user_id = %target, "user promoted to admin");
    Ok(Json(Envelope::message("Successfully made the user an admin")))
}

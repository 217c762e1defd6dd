//! # Login
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/api/login` | `login` |

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use checklist_crypto::token;

use crate::auth::{password_matches, SESSION_SUBJECT};
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Issued session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

pub fn router() -> Router<AppState> {
    Router::new().route("/api/login", post(login))
}

/// POST /api/login — Exchange the shared password for a session token.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session issued", body = LoginResponse),
        (status = 401, description = "Wrong password", body = crate::error::ErrorBody),
        (status = 500, description = "APP_PASSWORD not configured", body = crate::error::ErrorBody),
    ),
    tag = "session"
)]
pub(crate) async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Some(expected) = state.config.app_password.as_ref() else {
        tracing::error!("login attempted but APP_PASSWORD is not set");
        return Err(AppError::NotConfigured(
            "Server not configured: APP_PASSWORD missing".to_string(),
        ));
    };

    let req = extract_json(body)?;
    let provided = req.password.unwrap_or_default();
    if !password_matches(&provided, expected.expose()) {
        tracing::warn!("login rejected: wrong password");
        return Err(AppError::Unauthorized("Wrong password".to_string()));
    }

    let issued = token::issue(
        &state.session_key,
        SESSION_SUBJECT,
        Utc::now(),
        state.config.token_ttl,
    )
    .map_err(|e| {
        tracing::error!(error = %e, "cannot issue session token");
        AppError::NotConfigured("Server not configured: token lifetime out of range".to_string())
    })?;
    tracing::info!(expires_at = %issued.expires_at, "session issued");
    Ok(Json(LoginResponse {
        token: issued.token,
        expires_at: issued.expires_at,
    }))
}

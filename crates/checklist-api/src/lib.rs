//! # checklist-api — Axum API Service for the Checklist App
//!
//! A single-user checklist server: shared-password login, lists with
//! optional dates and country, quantified checkable items, copy, reorder,
//! plain-text export, and the static web client.
//!
//! ## API Surface
//!
//! | Prefix | Module | Auth |
//! |--------|--------|------|
//! | `/api/login` | [`routes::session`] | public |
//! | `/api/status`, `/api/logging-status` | [`routes::status`] | public |
//! | `/api/lists/*` | [`routes::lists`], [`routes::items`] | bearer |
//! | `/api/items/*` | [`routes::items`] | bearer |
//! | `/openapi.json` | [`openapi`] | public |
//! | `/health/*` | liveness and readiness | public |
//! | anything else | static client from `STATIC_DIR` | public |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer (LOGGING=ON) → DefaultBodyLimit → AuthMiddleware (/api data routes) → Handler
//! ```

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod health;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::extract::{DefaultBodyLimit, Request, State};
use axum::middleware::from_fn;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Router};
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::auth::AuthConfig;
use crate::error::AppError;
use crate::state::AppState;

/// Largest accepted request body.
const MAX_BODY_BYTES: usize = 64 * 1024;

/// Assemble the full application router with all routes and middleware.
///
/// Login, status, OpenAPI and health checks are mounted outside the auth
/// middleware so they remain accessible without credentials.
pub fn app(state: AppState) -> Router {
    let auth_config = AuthConfig {
        key: state.session_key.clone(),
    };

    // Authenticated data routes.
    let api = Router::new()
        .merge(routes::lists::router())
        .merge(routes::items::router())
        .layer(from_fn(auth::auth_middleware))
        .layer(Extension(auth_config));

    // Unauthenticated routes.
    let public = Router::new()
        .merge(routes::session::router())
        .merge(routes::status::router())
        .merge(openapi::router())
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    let logging = state.config.logging;
    let router = Router::new()
        .merge(public)
        .merge(api)
        .fallback(fallback)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state);

    if logging {
        router.layer(middleware::tracing_layer::layer())
    } else {
        router
    }
}

/// Liveness check — always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check — returns 200 when the store answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.db.ping().await.map_err(|e| {
        tracing::warn!(error = %e, backend = state.db.backend_name(), "readiness check failed");
        AppError::ServiceUnavailable("Database unreachable".to_string())
    })?;
    Ok("ready")
}

/// Unknown `/api` paths answer 404; everything else is the static client,
/// with `index.html` for paths that name no file.
async fn fallback(State(state): State<AppState>, request: Request) -> Response {
    let path = request.uri().path();
    if path == "/api" || path.starts_with("/api/") {
        return AppError::NotFound("Not found".to_string()).into_response();
    }
    match static_files(&state.config.static_dir).oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

fn static_files(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}

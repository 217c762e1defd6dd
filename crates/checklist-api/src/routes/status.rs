//! # Status
//!
//! Public endpoints the client polls. No token required.
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/status` | `db_status` |
//! | `GET` | `/api/logging-status` | `logging_status` |

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::health::DbStatus;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub db: DbStatus,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoggingStatusResponse {
    /// `"ON"` or `"OFF"`.
    pub logging: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/status", get(db_status))
        .route("/api/logging-status", get(logging_status))
}

/// GET /api/status — Check the store now and report its reachability.
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Database status", body = StatusResponse)),
    tag = "status"
)]
pub(crate) async fn db_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let db = state.health.check(&state.db).await;
    Json(StatusResponse { db })
}

/// GET /api/logging-status — Whether client-side logging is enabled.
#[utoipa::path(
    get,
    path = "/api/logging-status",
    responses((status = 200, description = "Logging flag", body = LoggingStatusResponse)),
    tag = "status"
)]
pub(crate) async fn logging_status(State(state): State<AppState>) -> Json<LoggingStatusResponse> {
    Json(LoggingStatusResponse {
        logging: state.config.logging_flag().to_string(),
    })
}

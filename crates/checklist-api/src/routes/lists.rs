//! # List Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/lists` | `list_lists` |
//! | `POST` | `/api/lists` | `create_list` |
//! | `PUT` | `/api/lists/{id}` | `update_list` |
//! | `DELETE` | `/api/lists/{id}` | `delete_list` |
//! | `POST` | `/api/lists/{id}/copy` | `copy_list` |
//! | `GET` | `/api/lists/{id}/export` | `export_list` |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use checklist_core::{render_plain_text, ListDraft, ListId, ListRecord, ValidationError};

use crate::error::AppError;
use crate::extractors::{extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Body of create and update. Blank strings count as absent.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListRequest {
    #[serde(default)]
    pub name: Option<String>,
    /// `YYYY-MM-DD`.
    #[serde(default, alias = "start_date")]
    pub start_date: Option<String>,
    /// `YYYY-MM-DD`, not before `startDate`.
    #[serde(default, alias = "end_date")]
    pub end_date: Option<String>,
    /// ISO 3166-1 alpha-2 code.
    #[serde(default)]
    pub country: Option<String>,
}

impl Validate for ListRequest {
    type Output = ListDraft;

    fn validate(self) -> Result<ListDraft, ValidationError> {
        ListDraft::parse(
            self.name.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.country.as_deref(),
        )
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/lists", get(list_lists).post(create_list))
        .route("/api/lists/{id}", put(update_list).delete(delete_list))
        .route("/api/lists/{id}/copy", post(copy_list))
        .route("/api/lists/{id}/export", get(export_list))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/lists — All lists, dated first by start date descending.
#[utoipa::path(
    get,
    path = "/api/lists",
    responses(
        (status = 200, description = "Lists in display order", body = Vec<ListRecord>),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn list_lists(State(state): State<AppState>) -> Result<Json<Vec<ListRecord>>, AppError> {
    Ok(Json(state.db.list_lists().await?))
}

/// POST /api/lists — Create a list.
#[utoipa::path(
    post,
    path = "/api/lists",
    request_body = ListRequest,
    responses(
        (status = 201, description = "List created", body = ListRecord),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn create_list(
    State(state): State<AppState>,
    body: Result<Json<ListRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let draft = extract_validated_json(body)?;
    let list = state.db.create_list(&draft).await?;
    tracing::info!(list_id = %list.id, "list created");
    Ok((StatusCode::CREATED, Json(list)))
}

/// PUT /api/lists/{id} — Replace name, dates and country.
#[utoipa::path(
    put,
    path = "/api/lists/{id}",
    params(("id" = i64, Path, description = "List id")),
    request_body = ListRequest,
    responses(
        (status = 200, description = "List updated", body = ListRecord),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn update_list(
    State(state): State<AppState>,
    Path(id): Path<ListId>,
    body: Result<Json<ListRequest>, JsonRejection>,
) -> Result<Json<ListRecord>, AppError> {
    let draft = extract_validated_json(body)?;
    Ok(Json(state.db.update_list(id, &draft).await?))
}

/// DELETE /api/lists/{id} — Delete a list and its items.
#[utoipa::path(
    delete,
    path = "/api/lists/{id}",
    params(("id" = i64, Path, description = "List id")),
    responses(
        (status = 204, description = "List deleted"),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn delete_list(
    State(state): State<AppState>,
    Path(id): Path<ListId>,
) -> Result<StatusCode, AppError> {
    state.db.delete_list(id).await?;
    tracing::info!(list_id = %id, "list deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/lists/{id}/copy — Duplicate a list with all of its items.
#[utoipa::path(
    post,
    path = "/api/lists/{id}/copy",
    params(("id" = i64, Path, description = "List to copy")),
    responses(
        (status = 201, description = "Copy created", body = ListRecord),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn copy_list(
    State(state): State<AppState>,
    Path(id): Path<ListId>,
) -> Result<impl IntoResponse, AppError> {
    let copy = state.db.copy_list(id).await?;
    tracing::info!(source = %id, copy = %copy.id, "list copied");
    Ok((StatusCode::CREATED, Json(copy)))
}

/// GET /api/lists/{id}/export — The list as plain text.
#[utoipa::path(
    get,
    path = "/api/lists/{id}/export",
    params(("id" = i64, Path, description = "List id")),
    responses(
        (status = 200, description = "Plain-text rendering", body = String, content_type = "text/plain"),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "lists"
)]
pub(crate) async fn export_list(
    State(state): State<AppState>,
    Path(id): Path<ListId>,
) -> Result<impl IntoResponse, AppError> {
    let list = state.db.get_list(id).await?;
    let items = state.db.list_items(id).await?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        render_plain_text(&list, &items),
    ))
}

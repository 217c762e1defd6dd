//! # Item Endpoints
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `GET` | `/api/lists/{id}/items` | `list_items` |
//! | `POST` | `/api/lists/{id}/items` | `create_item` |
//! | `PUT` | `/api/lists/{id}/items/reorder` | `reorder_items` |
//! | `PUT` | `/api/items/{id}` | `update_item` |
//! | `DELETE` | `/api/items/{id}` | `delete_item` |

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::Deserialize;
use utoipa::ToSchema;

use checklist_core::{ItemId, ItemPatch, ItemRecord, ListId, NewItem, ValidationError};

use crate::error::AppError;
use crate::extractors::{extract_json, extract_validated_json, Validate};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub label: Option<String>,
    /// Defaults to 1.
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl Validate for CreateItemRequest {
    type Output = NewItem;

    fn validate(self) -> Result<NewItem, ValidationError> {
        NewItem::new(self.label.as_deref(), self.quantity)
    }
}

/// Partial update. At least one field must be present.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub checked: Option<bool>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub label: Option<String>,
}

impl Validate for UpdateItemRequest {
    type Output = ItemPatch;

    fn validate(self) -> Result<ItemPatch, ValidationError> {
        ItemPatch::new(self.checked, self.quantity, self.label.as_deref())
    }
}

/// The complete new order of a list's items.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    #[serde(alias = "item_ids")]
    #[schema(value_type = Vec<i64>)]
    pub item_ids: Vec<ItemId>,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/lists/{id}/items", get(list_items).post(create_item))
        .route("/api/lists/{id}/items/reorder", put(reorder_items))
        .route("/api/items/{id}", put(update_item).delete(delete_item))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/lists/{id}/items — Items of a list in display order.
#[utoipa::path(
    get,
    path = "/api/lists/{id}/items",
    params(("id" = i64, Path, description = "List id")),
    responses(
        (status = 200, description = "Items ordered by sort_order, then id", body = Vec<ItemRecord>),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub(crate) async fn list_items(
    State(state): State<AppState>,
    Path(list_id): Path<ListId>,
) -> Result<Json<Vec<ItemRecord>>, AppError> {
    Ok(Json(state.db.list_items(list_id).await?))
}

/// POST /api/lists/{id}/items — Append an item to a list.
#[utoipa::path(
    post,
    path = "/api/lists/{id}/items",
    params(("id" = i64, Path, description = "List id")),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Item created", body = ItemRecord),
        (status = 400, description = "Validation error", body = crate::error::ErrorBody),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub(crate) async fn create_item(
    State(state): State<AppState>,
    Path(list_id): Path<ListId>,
    body: Result<Json<CreateItemRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let new = extract_validated_json(body)?;
    let item = state.db.create_item(list_id, &new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/lists/{id}/items/reorder — Persist a new item order.
#[utoipa::path(
    put,
    path = "/api/lists/{id}/items/reorder",
    params(("id" = i64, Path, description = "List id")),
    request_body = ReorderRequest,
    responses(
        (status = 200, description = "Items in their new order", body = Vec<ItemRecord>),
        (status = 400, description = "Ids do not match the list's items", body = crate::error::ErrorBody),
        (status = 404, description = "List not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub(crate) async fn reorder_items(
    State(state): State<AppState>,
    Path(list_id): Path<ListId>,
    body: Result<Json<ReorderRequest>, JsonRejection>,
) -> Result<Json<Vec<ItemRecord>>, AppError> {
    let req = extract_json(body)?;
    let items = state.db.reorder_items(list_id, &req.item_ids).await?;
    tracing::debug!(list_id = %list_id, items = items.len(), "items reordered");
    Ok(Json(items))
}

/// PUT /api/items/{id} — Update any of checked, quantity, label.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Item updated", body = ItemRecord),
        (status = 400, description = "No fields to update", body = crate::error::ErrorBody),
        (status = 404, description = "Item not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub(crate) async fn update_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
    body: Result<Json<UpdateItemRequest>, JsonRejection>,
) -> Result<Json<ItemRecord>, AppError> {
    let patch = extract_validated_json(body)?;
    Ok(Json(state.db.update_item(id, &patch).await?))
}

/// DELETE /api/items/{id} — Remove one item.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    params(("id" = i64, Path, description = "Item id")),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 404, description = "Item not found", body = crate::error::ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "items"
)]
pub(crate) async fn delete_item(
    State(state): State<AppState>,
    Path(id): Path<ItemId>,
) -> Result<StatusCode, AppError> {
    state.db.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

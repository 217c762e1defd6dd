//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Checklist API",
        version = "0.1.0",
        description = "Single-user checklists: lists with optional dates and country, quantified checkable items, copy, reorder and plain-text export.",
        license(name = "MIT")
    ),
    paths(
        // Session
        crate::routes::session::login,
        // Status
        crate::routes::status::db_status,
        crate::routes::status::logging_status,
        // Lists
        crate::routes::lists::list_lists,
        crate::routes::lists::create_list,
        crate::routes::lists::update_list,
        crate::routes::lists::delete_list,
        crate::routes::lists::copy_list,
        crate::routes::lists::export_list,
        // Items
        crate::routes::items::list_items,
        crate::routes::items::create_item,
        crate::routes::items::reorder_items,
        crate::routes::items::update_item,
        crate::routes::items::delete_item,
    ),
    components(schemas(
        checklist_core::ListRecord,
        checklist_core::ItemRecord,
        checklist_core::ListId,
        checklist_core::ItemId,
        checklist_core::CountryCode,
        crate::health::DbStatus,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::session::LoginRequest,
        crate::routes::session::LoginResponse,
        crate::routes::status::StatusResponse,
        crate::routes::status::LoggingStatusResponse,
        crate::routes::lists::ListRequest,
        crate::routes::items::CreateItemRequest,
        crate::routes::items::UpdateItemRequest,
        crate::routes::items::ReorderRequest,
    )),
    modifiers(&BearerAuth),
    tags(
        (name = "session", description = "Password login"),
        (name = "status", description = "Database and logging status"),
        (name = "lists", description = "Checklists"),
        (name = "items", description = "Checklist items"),
    )
)]
pub struct ApiDoc;

/// Registers the `bearer` security scheme referenced by protected paths.
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json — Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_endpoint_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/api/login",
            "/api/status",
            "/api/logging-status",
            "/api/lists",
            "/api/lists/{id}",
            "/api/lists/{id}/copy",
            "/api/lists/{id}/export",
            "/api/lists/{id}/items",
            "/api/lists/{id}/items/reorder",
            "/api/items/{id}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}

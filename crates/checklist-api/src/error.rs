//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps validation and storage errors to HTTP status codes and a JSON
//! body of the form `{"error": {"code": "...", "message": "..."}}`.
//! Database failures are logged and reported to the client only as
//! "Database error".

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use checklist_core::ValidationError;

use crate::db::StoreError;

/// Structured JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Inner error detail.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR").
    pub code: String,
    /// Human-readable error message, shown to the user by the client.
    pub message: String,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request fields violate a domain rule (400).
    #[error("{0}")]
    Validation(String),

    /// Request body could not be parsed (400).
    #[error("{0}")]
    BadRequest(String),

    /// Missing, invalid or expired credentials (401).
    #[error("{0}")]
    Unauthorized(String),

    /// Resource not found (404).
    #[error("{0}")]
    NotFound(String),

    /// A required server setting is absent (500). The message is returned.
    #[error("{0}")]
    NotConfigured(String),

    /// Storage failure (500). Logged, reported as "Database error".
    #[error("database error: {0}")]
    Database(String),

    /// Dependency unreachable (503).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Return the HTTP status code and machine-readable error code for this error.
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            Self::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            Self::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            Self::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::NotConfigured(_) => (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED"),
            Self::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            Self::ServiceUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            Self::Database(_) => {
                tracing::error!(error = %self, "database error");
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::ListNotFound(_) => Self::NotFound("List not found".to_string()),
            StoreError::ItemNotFound(_) => Self::NotFound("Item not found".to_string()),
            StoreError::Invalid(e) => e.into(),
            StoreError::Sqlx(e) => Self::Database(e.to_string()),
            StoreError::Migrate(e) => Self::Database(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checklist_core::{ItemId, ListId};
    use http_body_util::BodyExt;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let resp = err.into_response();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn validation_is_bad_request() {
        let err = AppError::from(ValidationError::NameRequired);
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(err.to_string(), "Name is required");
    }

    #[test]
    fn unauthorized_status_code() {
        let err = AppError::Unauthorized("no token".to_string());
        let (status, code) = err.status_and_code();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(code, "UNAUTHORIZED");
    }

    #[test]
    fn missing_rows_are_not_found() {
        let (status, _) = AppError::from(StoreError::ListNotFound(ListId(1))).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = AppError::from(StoreError::ItemNotFound(ItemId(1))).status_and_code();
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn database_error_hides_details() {
        let err = AppError::from(StoreError::Sqlx(sqlx::Error::PoolTimedOut));
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["message"], "Database error");
        assert_eq!(body["error"]["code"], "DATABASE_ERROR");
    }

    #[tokio::test]
    async fn service_unavailable_status_code() {
        let (status, body) = body_json(AppError::ServiceUnavailable("Database unreachable".into())).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "SERVICE_UNAVAILABLE");
    }

    #[tokio::test]
    async fn not_configured_message_is_returned() {
        let err = AppError::NotConfigured("Server not configured: APP_PASSWORD missing".into());
        let (status, body) = body_json(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body["error"]["message"],
            "Server not configured: APP_PASSWORD missing"
        );
    }

    #[tokio::test]
    async fn validation_body_carries_message() {
        let (status, body) = body_json(ValidationError::InvertedDateRange.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "End date cannot be before start date");
    }
}

//! # Request Body Extraction
//!
//! Handlers take `Result<Json<T>, JsonRejection>` so that malformed JSON is
//! reported in the same error format as every other failure. Request DTOs
//! implement [`Validate`] to turn raw fields into validated domain values.

use axum::extract::rejection::JsonRejection;
use axum::Json;

use checklist_core::ValidationError;

use crate::error::AppError;

/// Request types that convert into a validated domain value.
pub trait Validate {
    type Output;

    fn validate(self) -> Result<Self::Output, ValidationError>;
}

/// Extract a JSON body, mapping deserialization errors to [`AppError::BadRequest`].
pub fn extract_json<T>(result: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    result
        .map(|Json(v)| v)
        .map_err(|err| AppError::BadRequest(err.body_text()))
}

/// Extract a JSON body and validate it into its domain value.
pub fn extract_validated_json<T: Validate>(
    result: Result<Json<T>, JsonRejection>,
) -> Result<T::Output, AppError> {
    Ok(extract_json(result)?.validate()?)
}

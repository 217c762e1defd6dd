//! # Validation Errors
//!
//! Every rejection a client can cause with a well-formed request. The
//! `Display` text is returned verbatim in 400 responses, so messages are
//! written for the end user.

use thiserror::Error;

use crate::identity::ItemId;

/// A request field or combination of fields violates a domain rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,

    #[error("Label is required")]
    LabelRequired,

    /// Name or label exceeds [`crate::MAX_TEXT_LEN`] characters.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Date string is not a calendar date in `YYYY-MM-DD` form.
    #[error("Invalid date {0:?}: expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("End date cannot be before start date")]
    InvertedDateRange,

    /// Country is not a two-letter ISO 3166-1 alpha-2 code.
    #[error("Invalid country code {0:?}: expected two letters")]
    InvalidCountry(String),

    #[error("Quantity must be at least 1, got {0}")]
    QuantityTooSmall(i64),

    #[error("Quantity {0} is too large")]
    QuantityTooLarge(i64),

    #[error("No fields to update")]
    EmptyPatch,

    #[error("Item {0} appears more than once in the new order")]
    DuplicateItem(ItemId),

    #[error("Item {0} does not belong to this list")]
    UnknownItem(ItemId),

    /// The new order names fewer items than the list holds.
    #[error("New order lists {given} items but the list has {expected}")]
    IncompleteOrder { given: usize, expected: usize },
}

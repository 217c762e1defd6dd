//! # Country Codes
//!
//! ISO 3166-1 alpha-2 codes attached to a list. Input is accepted in either
//! case and normalised to upper-case; anything other than two ASCII letters
//! is rejected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Base of the Unicode regional indicator symbols (`🇦`).
const REGIONAL_INDICATOR_A: u32 = 0x1F1E6;

/// A validated, upper-case two-letter country code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(try_from = "String", into = "String")]
pub struct CountryCode(String);

impl CountryCode {
    /// Parse a country code, normalising to upper-case.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCountry(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The flag emoji formed by the two regional indicator symbols.
    pub fn flag_emoji(&self) -> String {
        self.0
            .bytes()
            .filter_map(|b| char::from_u32(REGIONAL_INDICATOR_A + u32::from(b - b'A')))
            .collect()
    }
}

impl TryFrom<String> for CountryCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CountryCode> for String {
    fn from(code: CountryCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for CountryCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

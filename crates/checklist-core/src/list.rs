//! # Lists
//!
//! A list is a named checklist with an optional date range and country.
//! [`ListDraft`] is the validated input for create and full-replace update;
//! [`ListRecord`] is what the store hands back.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::country::CountryCode;
use crate::error::ValidationError;
use crate::identity::ListId;
use crate::MAX_TEXT_LEN;

/// Suffix appended to the name of a duplicated list.
pub const COPY_SUFFIX: &str = " (copy)";

/// Optional start and end dates with `end >= start` when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateRange {
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, ValidationError> {
        if let (Some(s), Some(e)) = (start, end) {
            if e < s {
                return Err(ValidationError::InvertedDateRange);
            }
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` strings. Blank strings count as absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> Result<Self, ValidationError> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    pub fn start(&self) -> Option<NaiveDate> {
        self.start
    }

    pub fn end(&self) -> Option<NaiveDate> {
        self.end
    }
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ValidationError::InvalidDate(s.to_string())),
    }
}

/// Validated list fields for create and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListDraft {
    pub name: String,
    pub dates: DateRange,
    pub country: Option<CountryCode>,
}

impl ListDraft {
    /// Validate raw request fields.
    ///
    /// The name is trimmed and must be non-blank. Blank dates and a blank
    /// country are treated as absent.
    pub fn parse(
        name: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        country: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let name = name.map(str::trim).unwrap_or_default();
        if name.is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if name.chars().count() > MAX_TEXT_LEN {
            return Err(ValidationError::TooLong {
                field: "Name",
                max: MAX_TEXT_LEN,
            });
        }
        let dates = DateRange::parse(start_date, end_date)?;
        let country = country
            .filter(|c| !c.trim().is_empty())
            .map(CountryCode::parse)
            .transpose()?;
        Ok(Self {
            name: name.to_string(),
            dates,
            country,
        })
    }
}

/// A stored list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ListRecord {
    pub id: ListId,
    pub name: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub country: Option<CountryCode>,
}

impl ListRecord {
    /// Build a record from a draft and the id the store assigned.
    pub fn from_draft(id: ListId, draft: &ListDraft) -> Self {
        Self {
            id,
            name: draft.name.clone(),
            start_date: draft.dates.start(),
            end_date: draft.dates.end(),
            country: draft.country.clone(),
        }
    }

    /// Overwrite every mutable field with the draft's values.
    pub fn replace_with(&mut self, draft: &ListDraft) {
        self.name = draft.name.clone();
        self.start_date = draft.dates.start();
        self.end_date = draft.dates.end();
        self.country = draft.country.clone();
    }
}

/// Characters of the source name kept in a copy's name.
pub const COPY_NAME_PREFIX_LEN: usize = MAX_TEXT_LEN - COPY_SUFFIX.len();

/// Name given to the duplicate of a list called `name`.
///
/// The source name is cut to [`COPY_NAME_PREFIX_LEN`] characters so the
/// result never exceeds [`MAX_TEXT_LEN`].
pub fn copy_name(name: &str) -> String {
    let kept: String = name.chars().take(COPY_NAME_PREFIX_LEN).collect();
    format!("{kept}{COPY_SUFFIX}")
}

/// Display order: lists without a start date last, then start date
/// descending, then id descending.
///
/// Mirrors `ORDER BY start_date IS NULL, start_date DESC, id DESC`.
pub fn display_order(a: &ListRecord, b: &ListRecord) -> Ordering {
    match (a.start_date, b.start_date) {
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (x, y) => y.cmp(&x),
    }
    .then_with(|| b.id.cmp(&a.id))
}

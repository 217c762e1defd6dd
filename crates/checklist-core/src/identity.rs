//! # Identifier Newtypes
//!
//! Surrogate keys issued by the store. Both wrap `i64` (Postgres `BIGSERIAL`)
//! and serialize as bare JSON numbers, but they are distinct types: an
//! [`ItemId`] cannot be passed where a [`ListId`] is expected.

use serde::{Deserialize, Serialize};

/// Identifier of a checklist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ListId(pub i64);

/// Identifier of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl ListId {
    /// Access the raw key.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl ItemId {
    /// Access the raw key.
    pub fn get(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ListId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

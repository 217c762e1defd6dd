//! # checklist-core — Domain Types for the Checklist Service
//!
//! Every rule that does not need I/O lives here: what a valid list or item
//! looks like, how lists are ordered for display, how a copy is named, how a
//! reorder request is checked against the items a list actually holds, and
//! how a list renders as plain text.
//!
//! ## Key Design Principles
//!
//! 1. **Validated constructors.** [`ListDraft`], [`NewItem`], [`ItemPatch`],
//!    [`CountryCode`] and [`ReorderPlan`] can only be built through functions
//!    that return `Result<_, ValidationError>`. Storage backends accept these
//!    types, never raw request fields.
//!
//! 2. **Newtype identifiers.** [`ListId`] and [`ItemId`] are distinct types so
//!    an item id cannot be passed where a list id is expected.
//!
//! 3. **One ordering definition.** [`list::display_order`] and
//!    [`item::display_order`] are the only comparators; the in-memory store
//!    and the tests use them, and the SQL `ORDER BY` clauses mirror them.
//!
//! ## Crate Policy
//!
//! - No I/O, no async, no database types.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod country;
pub mod error;
pub mod export;
pub mod identity;
pub mod item;
pub mod list;

pub use country::CountryCode;
pub use error::ValidationError;
pub use export::render_plain_text;
pub use identity::{ItemId, ListId};
pub use item::{ItemPatch, ItemRecord, NewItem, ReorderPlan};
pub use list::{copy_name, DateRange, ListDraft, ListRecord};

/// Maximum length, in characters, of a list name or item label.
pub const MAX_TEXT_LEN: usize = 255;

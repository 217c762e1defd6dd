//! # API Route Modules
//!
//! - `session` — password login, issues bearer tokens (public).
//! - `status` — database and logging status for the client (public).
//! - `lists` — list CRUD, copy, plain-text export.
//! - `items` — item CRUD and reorder.

pub mod items;
pub mod lists;
pub mod session;
pub mod status;

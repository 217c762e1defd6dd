//! # Application State
//!
//! Shared state handed to every handler. All fields are cheap to clone.

use std::sync::Arc;

use checklist_crypto::SessionKey;

use crate::config::AppConfig;
use crate::db::Database;
use crate::health::DbHealth;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: Database,
    pub health: DbHealth,
    pub session_key: Arc<SessionKey>,
}

impl AppState {
    pub fn new(config: AppConfig, db: Database, session_key: SessionKey) -> Self {
        Self {
            config: Arc::new(config),
            db,
            health: DbHealth::default(),
            session_key: Arc::new(session_key),
        }
    }
}

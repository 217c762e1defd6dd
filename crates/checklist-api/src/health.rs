//! # Database Health
//!
//! A shared flag describing whether the store is reachable. It starts as
//! `busy`, is refreshed by a background task every
//! `DB_HEALTH_INTERVAL_SECS`, and by every `GET /api/status`. The first
//! successful check also applies pending migrations.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db::Database;

/// Reachability of the store, as reported by `GET /api/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DbStatus {
    /// No check has completed yet.
    #[default]
    Busy,
    Connected,
    Error,
}

#[derive(Debug, Default)]
struct HealthState {
    status: DbStatus,
    schema_ready: bool,
}

/// Shared health flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct DbHealth {
    inner: Arc<RwLock<HealthState>>,
}

impl DbHealth {
    pub fn status(&self) -> DbStatus {
        self.inner.read().status
    }

    fn schema_ready(&self) -> bool {
        self.inner.read().schema_ready
    }

    fn record(&self, status: DbStatus, schema_ready: bool) {
        let mut state = self.inner.write();
        if state.status != status {
            match status {
                DbStatus::Connected => tracing::info!(from = ?state.status, "database connected"),
                DbStatus::Error => tracing::warn!(from = ?state.status, "database unreachable"),
                DbStatus::Busy => {}
            }
        }
        state.status = status;
        state.schema_ready = state.schema_ready || schema_ready;
    }

    /// Ping the store, apply migrations once it answers, and record the result.
    pub async fn check(&self, db: &Database) -> DbStatus {
        if let Err(e) = db.ping().await {
            tracing::debug!(error = %e, "database ping failed");
            self.record(DbStatus::Error, false);
            return DbStatus::Error;
        }

        if !self.schema_ready() {
            if let Err(e) = db.migrate().await {
                tracing::error!(error = %e, "database migration failed");
                self.record(DbStatus::Error, false);
                return DbStatus::Error;
            }
        }

        self.record(DbStatus::Connected, true);
        DbStatus::Connected
    }

    /// Re-check the store every `interval` until the runtime shuts down.
    pub fn spawn_monitor(&self, db: Database, interval: Duration) -> tokio::task::JoinHandle<()> {
        let health = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                health.check(&db).await;
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_busy() {
        let health = DbHealth::default();
        assert_eq!(health.status(), DbStatus::Busy);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&DbStatus::Connected).unwrap(), "\"connected\"");
        assert_eq!(serde_json::to_string(&DbStatus::Busy).unwrap(), "\"busy\"");
        assert_eq!(serde_json::to_string(&DbStatus::Error).unwrap(), "\"error\"");
    }

    #[tokio::test]
    async fn memory_store_is_connected() {
        let health = DbHealth::default();
        let db = Database::in_memory();
        assert_eq!(health.check(&db).await, DbStatus::Connected);
        assert_eq!(health.clone().status(), DbStatus::Connected);
        assert!(health.schema_ready());
    }
}

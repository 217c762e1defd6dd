//! # Storage
//!
//! Two interchangeable backends behind one [`Database`] handle:
//!
//! - **Postgres** (`sqlx`): the production store. Schema is embedded from
//!   `migrations/` via `sqlx::migrate!` and applied once the database is
//!   reachable. Copy and reorder run inside a single transaction.
//! - **Memory** ([`memory::MemoryStore`]): process-local maps behind a
//!   `parking_lot::RwLock`, with the same ordering and not-found semantics.
//!   Used by `--in-memory` and by the integration tests.
//!
//! Handlers only see [`Database`] and [`StoreError`].

pub mod items;
pub mod lists;
pub mod memory;

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use thiserror::Error;

use checklist_core::{
    ItemId, ItemPatch, ItemRecord, ListDraft, ListId, ListRecord, NewItem, ValidationError,
};

use crate::config::DatabaseConfig;
use memory::MemoryStore;

/// Errors surfaced by either backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("list {0} not found")]
    ListNotFound(ListId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    /// The request is well-formed but inconsistent with stored data.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Handle to the configured store. Cheap to clone.
#[derive(Clone, Debug)]
pub enum Database {
    Postgres(PgPool),
    Memory(MemoryStore),
}

impl Database {
    /// Build a Postgres pool without connecting. Connections are opened on
    /// first use, so the server starts even when the database is down.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .acquire_timeout(Duration::from_secs(5))
            .connect_lazy_with(config.connect_options());
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.name,
            "postgres pool configured"
        );
        Self::Postgres(pool)
    }

    pub fn in_memory() -> Self {
        Self::Memory(MemoryStore::default())
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Round-trip to the store.
    pub async fn ping(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::query("SELECT 1").execute(pool).await?;
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }

    /// Apply pending migrations. A no-op for the memory store.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => {
                sqlx::migrate!("./migrations").run(pool).await?;
                tracing::info!("database migrations applied");
                Ok(())
            }
            Self::Memory(_) => Ok(()),
        }
    }

    // -- Lists ---------------------------------------------------------------

    pub async fn list_lists(&self) -> Result<Vec<ListRecord>, StoreError> {
        match self {
            Self::Postgres(pool) => lists::list_all(pool).await,
            Self::Memory(store) => Ok(store.list_lists()),
        }
    }

    pub async fn get_list(&self, id: ListId) -> Result<ListRecord, StoreError> {
        match self {
            Self::Postgres(pool) => lists::find(pool, id).await,
            Self::Memory(store) => store.get_list(id),
        }
    }

    pub async fn create_list(&self, draft: &ListDraft) -> Result<ListRecord, StoreError> {
        match self {
            Self::Postgres(pool) => lists::insert(pool, draft).await,
            Self::Memory(store) => Ok(store.create_list(draft)),
        }
    }

    pub async fn update_list(&self, id: ListId, draft: &ListDraft) -> Result<ListRecord, StoreError> {
        match self {
            Self::Postgres(pool) => lists::update(pool, id, draft).await,
            Self::Memory(store) => store.update_list(id, draft),
        }
    }

    pub async fn delete_list(&self, id: ListId) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => lists::delete(pool, id).await,
            Self::Memory(store) => store.delete_list(id),
        }
    }

    /// Duplicate a list and all of its items.
    pub async fn copy_list(&self, id: ListId) -> Result<ListRecord, StoreError> {
        match self {
            Self::Postgres(pool) => lists::copy(pool, id).await,
            Self::Memory(store) => store.copy_list(id),
        }
    }

    // -- Items ---------------------------------------------------------------

    /// Items of `list_id` in display order. Empty for an unknown list.
    pub async fn list_items(&self, list_id: ListId) -> Result<Vec<ItemRecord>, StoreError> {
        match self {
            Self::Postgres(pool) => items::list_for(pool, list_id).await,
            Self::Memory(store) => Ok(store.list_items(list_id)),
        }
    }

    pub async fn create_item(&self, list_id: ListId, item: &NewItem) -> Result<ItemRecord, StoreError> {
        match self {
            Self::Postgres(pool) => items::insert(pool, list_id, item).await,
            Self::Memory(store) => store.create_item(list_id, item),
        }
    }

    pub async fn update_item(&self, id: ItemId, patch: &ItemPatch) -> Result<ItemRecord, StoreError> {
        match self {
            Self::Postgres(pool) => items::update(pool, id, patch).await,
            Self::Memory(store) => store.update_item(id, patch),
        }
    }

    pub async fn delete_item(&self, id: ItemId) -> Result<(), StoreError> {
        match self {
            Self::Postgres(pool) => items::delete(pool, id).await,
            Self::Memory(store) => store.delete_item(id),
        }
    }

    /// Persist `order` as positions `0..n` and return the reordered items.
    pub async fn reorder_items(
        &self,
        list_id: ListId,
        order: &[ItemId],
    ) -> Result<Vec<ItemRecord>, StoreError> {
        match self {
            Self::Postgres(pool) => items::reorder(pool, list_id, order).await,
            Self::Memory(store) => store.reorder_items(list_id, order),
        }
    }
}

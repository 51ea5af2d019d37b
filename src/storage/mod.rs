//! Persistence for purchases.
//!
//! `PurchaseStore` is the single interface the rest of the crate talks to.
//! Two implementations exist: `SqliteStore` for a local database file and
//! `PostgresStore` for a networked server. They differ in placeholder syntax
//! (`?` vs `$n`), auto-increment declaration and how the new id is read back;
//! none of that leaks past this module.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::config::StoreConfig;
use crate::domain::{DATE_FORMAT, NewPurchase, Purchase, PurchaseId};

mod postgres;
mod sqlite;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

/// SQLite schema for the purchases table
pub const SQLITE_SCHEMA: &str = include_str!("migrations/sqlite/001_purchases.sql");

/// PostgreSQL schema for the purchases table
pub const POSTGRES_SCHEMA: &str = include_str!("migrations/postgres/001_purchases.sql");

#[async_trait]
pub trait PurchaseStore: Send + Sync {
    /// Create the purchases table if it does not exist. Safe to call on every start.
    async fn initialize(&self) -> Result<()>;

    /// Append one purchase and return the id the database generated for it.
    async fn insert(&self, purchase: &NewPurchase) -> Result<PurchaseId>;

    /// Every purchase, most recent (highest id) first.
    async fn list_all(&self) -> Result<Vec<Purchase>>;

    /// Remove one purchase. Returns `false` when no row had that id.
    async fn delete(&self, id: PurchaseId) -> Result<bool>;

    /// Remove every purchase and return how many rows were removed.
    async fn delete_all(&self) -> Result<u64>;

    async fn count(&self) -> Result<i64>;

    /// Short backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Connect to the configured backend and make sure the schema exists.
///
/// Called once at startup; the returned store is shared for the lifetime of the process.
pub async fn open_store(config: &StoreConfig) -> Result<Arc<dyn PurchaseStore>> {
    let store: Arc<dyn PurchaseStore> = match config {
        StoreConfig::Sqlite { path } => Arc::new(SqliteStore::connect(path).await?),
        StoreConfig::Postgres { url } => Arc::new(PostgresStore::connect(url).await?),
    };

    store
        .initialize()
        .await
        .with_context(|| format!("Failed to initialize {} store", store.backend()))?;

    tracing::info!(backend = store.backend(), "purchase store ready");
    Ok(store)
}

fn parse_stored_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .with_context(|| format!("Invalid purchase date: {value}"))
}

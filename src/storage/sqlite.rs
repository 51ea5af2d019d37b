use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use crate::domain::{DATE_FORMAT, NewPurchase, Purchase, PurchaseId};

use super::{PurchaseStore, SQLITE_SCHEMA, parse_stored_date};

/// Purchases kept in a local SQLite file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Create a new store with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open the database file at `path`, creating it if it doesn't exist.
    pub async fn connect(path: &str) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open SQLite database at {path}"))?;
        Ok(Self::new(pool))
    }

    fn row_to_purchase(row: &SqliteRow) -> Result<Purchase> {
        let date_str: String = row.try_get("date")?;

        Ok(Purchase {
            id: row.try_get("id")?,
            date: parse_stored_date(&date_str)?,
            description: row.try_get("description")?,
            amount: row.try_get("amount")?,
            who: row.try_get("who")?,
        })
    }
}

#[async_trait]
impl PurchaseStore for SqliteStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(SQLITE_SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to create purchases table")?;
        Ok(())
    }

    async fn insert(&self, purchase: &NewPurchase) -> Result<PurchaseId> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchases (date, description, amount, who)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(purchase.date.format(DATE_FORMAT).to_string())
        .bind(&purchase.description)
        .bind(purchase.amount)
        .bind(&purchase.who)
        .execute(&self.pool)
        .await
        .context("Failed to save purchase")?;

        Ok(result.last_insert_rowid())
    }

    async fn list_all(&self) -> Result<Vec<Purchase>> {
        let rows = sqlx::query(
            r#"
            SELECT id, date, description, amount, who
            FROM purchases
            ORDER BY id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list purchases")?;

        rows.iter().map(Self::row_to_purchase).collect()
    }

    async fn delete(&self, id: PurchaseId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM purchases WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .context("Failed to delete purchase")?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM purchases")
            .execute(&self.pool)
            .await
            .context("Failed to clear purchases")?;
        Ok(result.rows_affected())
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM purchases")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count purchases")?;
        Ok(row.try_get("count")?)
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::{DATE_FORMAT, NewPurchase, Purchase, PurchaseId};

use super::{POSTGRES_SCHEMA, PurchaseStore, parse_stored_date};

/// Traffic is a handful of requests at a time.
const MAX_CONNECTIONS: u32 = 5;

/// Purchases kept on a PostgreSQL server.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using a `postgres://` connection string.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect(database_url)
            .await
            .context("Failed to connect to PostgreSQL")?;
        Ok(Self::new(pool))
    }

    fn row_to_purchase(row: &PgRow) -> Result<Purchase> {
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
impl PurchaseStore for PostgresStore {
    async fn initialize(&self) -> Result<()> {
        sqlx::query(POSTGRES_SCHEMA)
            .execute(&self.pool)
            .await
            .context("Failed to create purchases table")?;
        Ok(())
    }

    async fn insert(&self, purchase: &NewPurchase) -> Result<PurchaseId> {
        let row = sqlx::query(
            r#"
            INSERT INTO purchases (date, description, amount, who)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(purchase.date.format(DATE_FORMAT).to_string())
        .bind(&purchase.description)
        .bind(purchase.amount)
        .bind(&purchase.who)
        .fetch_one(&self.pool)
        .await
        .context("Failed to save purchase")?;

        Ok(row.try_get("id")?)
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
        let result = sqlx::query("DELETE FROM purchases WHERE id = $1")
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
        let row = sqlx::query("SELECT COUNT(*) AS count FROM purchases")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count purchases")?;
        Ok(row.try_get("count")?)
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

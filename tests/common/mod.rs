// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use halves::application::{LedgerService, PurchaseForm, SubmitOutcome};
use halves::config::StoreConfig;
use halves::domain::Purchase;
use tempfile::TempDir;

/// Set to a PostgreSQL connection string to run the PostgreSQL tests.
pub const POSTGRES_TEST_URL_ENV: &str = "HALVES_TEST_DATABASE_URL";

/// Helper to create a test service with a temporary SQLite database
pub async fn test_service() -> Result<(LedgerService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let config = sqlite_config(&temp_dir);
    let service = LedgerService::init(&config).await?;
    Ok((service, temp_dir))
}

pub fn sqlite_config(temp_dir: &TempDir) -> StoreConfig {
    let db_path = temp_dir.path().join("purchases.db");
    StoreConfig::Sqlite {
        path: db_path.to_str().unwrap().to_string(),
    }
}

/// `None` when no PostgreSQL server is configured for tests.
pub fn postgres_config() -> Option<StoreConfig> {
    std::env::var(POSTGRES_TEST_URL_ENV)
        .ok()
        .filter(|url| !url.trim().is_empty())
        .map(|url| StoreConfig::Postgres { url })
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
}

/// Submit a purchase and return it, failing the test if it was rejected
pub async fn record(
    service: &LedgerService,
    description: &str,
    amount: &str,
    who: &str,
) -> Result<Purchase> {
    let form = PurchaseForm::new(description, amount, Some(who));
    match service.submit(&form).await? {
        SubmitOutcome::Recorded(purchase) => Ok(purchase),
        SubmitOutcome::Rejected(rejection) => {
            anyhow::bail!("unexpected rejection: {rejection}")
        }
    }
}

/// Test fixture: the coffee / rent / movie ledger
pub async fn seed_basic(service: &LedgerService) -> Result<()> {
    record(service, "coffee", "4.50", "joe").await?;
    record(service, "rent", "1000", "joint").await?;
    record(service, "movie", "30", "kath").await?;
    Ok(())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::StoreConfig;
use crate::domain::{BalanceSummary, Purchase, PurchaseId};
use crate::storage::{PurchaseStore, open_store};

use super::{AppError, PurchaseForm, Rejection};

/// Application service for the shared ledger.
/// This is the primary interface for any client (web, CLI, tests).
#[derive(Clone)]
pub struct LedgerService {
    store: Arc<dyn PurchaseStore>,
}

/// Result of a submission
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Recorded(Purchase),
    Rejected(Rejection),
}

/// Everything the listing view shows
#[derive(Debug, Clone)]
pub struct LedgerOverview {
    /// Most recent first
    pub purchases: Vec<Purchase>,
    pub balance: BalanceSummary,
}

impl LedgerService {
    /// Create a new ledger service on top of an already initialized store.
    pub fn new(store: Arc<dyn PurchaseStore>) -> Self {
        Self { store }
    }

    /// Connect to the configured store and create the schema if needed.
    pub async fn init(config: &StoreConfig) -> Result<Self, AppError> {
        let store = open_store(config).await?;
        Ok(Self::new(store))
    }

    pub fn store(&self) -> &Arc<dyn PurchaseStore> {
        &self.store
    }

    /// Record a purchase dated with the server's current local date.
    pub async fn submit(&self, form: &PurchaseForm) -> Result<SubmitOutcome, AppError> {
        self.submit_on(form, Local::now().date_naive()).await
    }

    /// Record a purchase with an explicit date.
    ///
    /// Invalid input is not an error: it comes back as `SubmitOutcome::Rejected`
    /// and nothing is written.
    pub async fn submit_on(
        &self,
        form: &PurchaseForm,
        date: NaiveDate,
    ) -> Result<SubmitOutcome, AppError> {
        let new_purchase = match form.validate(date) {
            Ok(new_purchase) => new_purchase,
            Err(rejection) => {
                tracing::debug!(%rejection, "purchase rejected");
                return Ok(SubmitOutcome::Rejected(rejection));
            }
        };

        let id = self.store.insert(&new_purchase).await?;
        let purchase = new_purchase.into_purchase(id);
        tracing::info!(
            id = purchase.id,
            who = %purchase.who,
            amount = purchase.amount,
            "purchase recorded"
        );
        Ok(SubmitOutcome::Recorded(purchase))
    }

    /// List every purchase, newest first.
    pub async fn list_purchases(&self) -> Result<Vec<Purchase>, AppError> {
        Ok(self.store.list_all().await?)
    }

    /// Purchases plus the balance, recomputed from the full list on every call.
    pub async fn overview(&self) -> Result<LedgerOverview, AppError> {
        let purchases = self.list_purchases().await?;
        let balance = BalanceSummary::compute(&purchases);
        Ok(LedgerOverview { purchases, balance })
    }

    pub async fn balance(&self) -> Result<BalanceSummary, AppError> {
        Ok(self.overview().await?.balance)
    }

    /// Delete one purchase. Unknown ids are a no-op.
    pub async fn delete_purchase(&self, id: PurchaseId) -> Result<(), AppError> {
        if self.store.delete(id).await? {
            tracing::info!(id, "purchase deleted");
        } else {
            tracing::debug!(id, "no purchase to delete");
        }
        Ok(())
    }

    /// Delete every purchase.
    pub async fn clear(&self) -> Result<(), AppError> {
        let removed = self.store.delete_all().await?;
        tracing::info!(removed, "ledger cleared");
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.store.count().await?)
    }
}

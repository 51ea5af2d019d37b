use chrono::NaiveDate;

use super::Amount;

pub type PurchaseId = i64;

/// Storage format of `Purchase::date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Who a purchase is attributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Payer {
    /// Paid for Joe alone
    Joe,
    /// Paid for Kath alone
    Kath,
    /// Shared, split evenly
    #[default]
    Joint,
}

impl Payer {
    pub const ALL: [Payer; 3] = [Payer::Joe, Payer::Kath, Payer::Joint];

    pub fn as_str(&self) -> &'static str {
        match self {
            Payer::Joe => "joe",
            Payer::Kath => "kath",
            Payer::Joint => "joint",
        }
    }

    /// Exact, case-sensitive match. `"Joe"` or `" joe"` is not a payer.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "joe" => Some(Payer::Joe),
            "kath" => Some(Payer::Kath),
            "joint" => Some(Payer::Joint),
            _ => None,
        }
    }
}

impl std::fmt::Display for Payer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single recorded purchase. Purchases are never edited, only deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    /// Assigned by the store on insert
    pub id: PurchaseId,
    /// Server date at insertion time
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    /// Raw category as submitted. Usually a `Payer`, but any string is kept.
    pub who: String,
}

impl Purchase {
    /// The recognized payer, or `None` when `who` is not one of the known categories.
    pub fn payer(&self) -> Option<Payer> {
        Payer::from_str(&self.who)
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// A validated purchase that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPurchase {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Amount,
    pub who: String,
}

impl NewPurchase {
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Amount,
        who: impl Into<String>,
    ) -> Self {
        Self {
            date,
            description: description.into(),
            amount,
            who: who.into(),
        }
    }

    /// Attach the id handed back by the store.
    pub fn into_purchase(self, id: PurchaseId) -> Purchase {
        Purchase {
            id,
            date: self.date,
            description: self.description,
            amount: self.amount,
            who: self.who,
        }
    }
}

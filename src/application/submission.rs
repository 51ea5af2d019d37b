use std::fmt;

use chrono::NaiveDate;

use crate::domain::{NewPurchase, ParseAmountError, Payer, parse_amount};

/// Amount used when the form has no `amount` field at all.
const MISSING_AMOUNT: &str = "0";

/// Raw purchase input, as posted by the entry form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseForm {
    pub description: Option<String>,
    pub amount: Option<String>,
    pub who: Option<String>,
}

impl PurchaseForm {
    pub fn new(description: &str, amount: &str, who: Option<&str>) -> Self {
        Self {
            description: Some(description.to_string()),
            amount: Some(amount.to_string()),
            who: who.map(str::to_string),
        }
    }

    /// Build a form from decoded `key=value` pairs.
    ///
    /// The first value of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "description" => &mut form.description,
                "amount" => &mut form.amount,
                "who" => &mut form.who,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        form
    }

    /// Trim and parse the form into a purchase dated `date`.
    ///
    /// A missing amount counts as `0`; a blank one is rejected.
    /// `who` defaults to `joint` when missing or empty. Any other value is
    /// kept verbatim, including categories the balance does not know about.
    pub fn validate(&self, date: NaiveDate) -> Result<NewPurchase, Rejection> {
        let description = self.description.as_deref().unwrap_or_default().trim();
        if description.is_empty() {
            return Err(Rejection::EmptyDescription);
        }

        let amount = parse_amount(self.amount.as_deref().unwrap_or(MISSING_AMOUNT)).map_err(
            |err| match err {
                ParseAmountError::Empty => Rejection::EmptyAmount,
                ParseAmountError::InvalidFormat | ParseAmountError::NotANumber => {
                    Rejection::InvalidAmount
                }
            },
        )?;

        let who = match self.who.as_deref() {
            Some(who) if !who.is_empty() => who,
            _ => Payer::default().as_str(),
        };

        Ok(NewPurchase::new(date, description, amount, who))
    }
}

/// Why a submission was dropped. Rejections are silent to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    EmptyDescription,
    EmptyAmount,
    InvalidAmount,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyDescription => write!(f, "description is empty"),
            Rejection::EmptyAmount => write!(f, "amount is empty"),
            Rejection::InvalidAmount => write!(f, "amount is not a number"),
        }
    }
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Exchange factors keyed by currency code, expressed as units per 1 INR.
///
/// The table must contain every currency code used by the card catalog;
/// referential integrity between the two is the providers' responsibility.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrencyTable {
    pub rates: HashMap<String, f64>,
    pub fetched_at: DateTime<Utc>,
}

impl CurrencyTable {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self {
            rates,
            fetched_at: Utc::now(),
        }
    }

    /// Units of `code` bought by 1 INR
    pub fn units_per_inr(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }
}

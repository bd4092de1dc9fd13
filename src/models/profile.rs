use serde::{Deserialize, Serialize};

use super::CardTier;

/// Credit score assigned to applicants with no credit history
pub const NEW_TO_CREDIT_SCORE: u16 = 300;

/// Spending category tracked by the profile form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SpendCategory {
    Groceries,
    OnlineShopping,
    Travel,
    Dining,
    Utilities,
    Fuel,
    Other,
}

impl SpendCategory {
    pub const ALL: [SpendCategory; 7] = [
        SpendCategory::Groceries,
        SpendCategory::OnlineShopping,
        SpendCategory::Travel,
        SpendCategory::Dining,
        SpendCategory::Utilities,
        SpendCategory::Fuel,
        SpendCategory::Other,
    ];

    /// Human-readable label used in explanation prompts
    pub fn label(self) -> &'static str {
        match self {
            SpendCategory::Groceries => "groceries",
            SpendCategory::OnlineShopping => "online shopping",
            SpendCategory::Travel => "travel",
            SpendCategory::Dining => "dining",
            SpendCategory::Utilities => "utilities",
            SpendCategory::Fuel => "fuel",
            SpendCategory::Other => "other",
        }
    }
}

/// Monthly spending per category, in INR
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct MonthlySpending {
    #[serde(default)]
    pub groceries: f64,
    #[serde(default)]
    pub online_shopping: f64,
    #[serde(default)]
    pub travel: f64,
    #[serde(default)]
    pub dining: f64,
    #[serde(default)]
    pub utilities: f64,
    #[serde(default)]
    pub fuel: f64,
    #[serde(default)]
    pub other: f64,
}

impl MonthlySpending {
    /// Monthly amount for one category
    pub fn amount(&self, category: SpendCategory) -> f64 {
        match category {
            SpendCategory::Groceries => self.groceries,
            SpendCategory::OnlineShopping => self.online_shopping,
            SpendCategory::Travel => self.travel,
            SpendCategory::Dining => self.dining,
            SpendCategory::Utilities => self.utilities,
            SpendCategory::Fuel => self.fuel,
            SpendCategory::Other => self.other,
        }
    }

    /// Iterates every category with its monthly amount
    pub fn iter(&self) -> impl Iterator<Item = (SpendCategory, f64)> + '_ {
        SpendCategory::ALL.iter().map(move |c| (*c, self.amount(*c)))
    }
}

/// A user's financial profile, assembled per request by the caller.
///
/// Numeric fields are assumed already coerced to non-negative values and
/// categorical fields validated against known enumerations; the engine does
/// not re-validate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    /// Annual income in INR
    pub income: f64,
    /// Credit score in the 300-850 range
    pub credit_score: u16,
    pub spending: MonthlySpending,
    /// Preference tags: `LoungeAccess`, `Low_Fee`, or a reward-category name
    #[serde(default)]
    pub preferences: Vec<String>,
    /// Empty means no tier restriction
    #[serde(default)]
    pub preferred_tiers: Vec<CardTier>,
    #[serde(default)]
    pub new_to_credit: bool,
}

impl UserProfile {
    /// Builds a profile, pinning the credit score to 300 for applicants
    /// flagged as new to credit.
    pub fn new(
        income: f64,
        credit_score: u16,
        spending: MonthlySpending,
        preferences: Vec<String>,
        preferred_tiers: Vec<CardTier>,
        new_to_credit: bool,
    ) -> Self {
        let credit_score = if new_to_credit {
            NEW_TO_CREDIT_SCORE
        } else {
            credit_score
        };
        Self {
            income,
            credit_score,
            spending,
            preferences,
            preferred_tiers,
            new_to_credit,
        }
    }

    /// Whether the user declared a given preference tag
    pub fn prefers(&self, tag: &str) -> bool {
        self.preferences.iter().any(|p| p == tag)
    }
}

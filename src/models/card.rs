use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Reward-rate category that applies to any spending without a specific match
pub const DEFAULT_REWARD_CATEGORY: &str = "default";

/// Assumed issuer profit margin when the catalog does not supply one
pub const DEFAULT_PROFIT_MARGIN: f64 = 0.05;

/// Card class, used both for eligibility filtering and catalog browsing
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardTier {
    #[serde(rename = "Entry-Level")]
    EntryLevel,
    Standard,
    Premium,
    #[serde(rename = "Super-Premium")]
    SuperPremium,
}

impl Display for CardTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            CardTier::EntryLevel => "Entry-Level",
            CardTier::Standard => "Standard",
            CardTier::Premium => "Premium",
            CardTier::SuperPremium => "Super-Premium",
        };
        write!(f, "{}", label)
    }
}

/// One entry of a card's reward table: a fraction of spend in `category`
/// returned as value
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RewardRate {
    pub category: String,
    pub rate: f64,
}

/// A credit card record as supplied by the global card catalog.
///
/// Field names mirror the upstream catalog JSON. Monetary thresholds
/// (`MinIncome`, `AnnualFee`, `PerksValue`) are denominated in the card's
/// own currency; the engine converts via the currency table at evaluation
/// time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    #[serde(rename = "CardName")]
    pub name: String,
    #[serde(rename = "Issuer")]
    pub issuer: String,
    #[serde(rename = "Country")]
    pub country: String,
    #[serde(rename = "Currency")]
    pub currency: String,
    #[serde(rename = "CardTier")]
    pub tier: CardTier,
    #[serde(rename = "MinIncome")]
    pub min_income: f64,
    #[serde(rename = "MinCreditScore")]
    pub min_credit_score: u16,
    #[serde(rename = "AnnualFee")]
    pub annual_fee: f64,
    #[serde(rename = "PerksValue", default)]
    pub perks_value: Option<f64>,
    #[serde(rename = "ProfitMargin", default)]
    pub profit_margin: Option<f64>,
    #[serde(rename = "LoungeAccess", default)]
    pub lounge_access: bool,
    #[serde(rename = "RewardCategories", default)]
    pub reward_categories: Vec<String>,
    #[serde(default)]
    pub reward_rates: Vec<RewardRate>,
}

impl Card {
    /// Looks up the reward rate declared for a specific category tag
    pub fn reward_rate(&self, tag: &str) -> Option<f64> {
        self.reward_rates
            .iter()
            .find(|r| r.category == tag)
            .map(|r| r.rate)
    }

    /// The card's `default` reward rate, or 0 when absent
    pub fn default_reward_rate(&self) -> f64 {
        self.reward_rate(DEFAULT_REWARD_CATEGORY).unwrap_or(0.0)
    }

    /// Perks value in the card's currency, 0 when absent
    pub fn perks(&self) -> f64 {
        self.perks_value.unwrap_or(0.0)
    }

    /// Issuer profit margin, defaulted when the catalog does not supply one
    pub fn margin(&self) -> f64 {
        self.profit_margin.unwrap_or(DEFAULT_PROFIT_MARGIN)
    }

    /// Whether the card rewards spending under the given category tag
    pub fn rewards_category(&self, tag: &str) -> bool {
        self.reward_categories.iter().any(|c| c == tag)
    }
}

use serde::{Deserialize, Serialize};

use super::Card;

/// Rounded components of a card's net annual value, in whole rupees.
/// The fee is carried with its sign, so the three sum to roughly the net.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueBreakdown {
    pub rewards: i64,
    pub perks: i64,
    pub fee: i64,
}

/// Net annual value of one card for one profile, with its breakdown
#[derive(Debug, Clone, PartialEq)]
pub struct NetValue {
    pub net_value: f64,
    pub breakdown: ValueBreakdown,
}

/// Two-sided scores for one card, rounded to 2 decimals for output.
///
/// `customer_score` and `bank_score` lie in [0, 10]; `nash_product` is
/// their product, in [0, 100], and is the ranking key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Scores {
    pub customer_score: f64,
    pub bank_score: f64,
    pub nash_product: f64,
}

/// A card evaluated against one profile. Recomputed fresh per request,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCard {
    pub card: Card,
    pub net_annual_value: f64,
    pub breakdown: ValueBreakdown,
    pub scores: Scores,
}

/// Output of the full analysis: the top picks plus every eligible card,
/// scored and sorted, for visualization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Analysis {
    pub recommendations: Vec<ScoredCard>,
    pub all_scored_cards: Vec<ScoredCard>,
}

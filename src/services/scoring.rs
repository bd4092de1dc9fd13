use crate::models::{Card, Scores, UserProfile};

/// Boost applied when the user wants lounge access and the card has it
const LOUNGE_ACCESS_BOOST: f64 = 0.15;
/// Boost applied per preference tag found among the card's reward categories
const REWARD_CATEGORY_BOOST: f64 = 0.10;
/// Boost applied when the user wants a low fee and the card's fee is below
/// the threshold. The threshold is compared against the fee in the card's
/// native currency, unconverted.
const LOW_FEE_BOOST: f64 = 0.10;
const LOW_FEE_THRESHOLD: f64 = 500.0;

const LOUNGE_ACCESS_TAG: &str = "LoungeAccess";
const LOW_FEE_TAG: &str = "Low_Fee";

/// Preference multiplier for one card. Boosts are additive; a profile can
/// accumulate several on the same card.
pub fn preference_boost(card: &Card, profile: &UserProfile) -> f64 {
    let mut boost = 1.0;
    for pref in &profile.preferences {
        if pref == LOUNGE_ACCESS_TAG && card.lounge_access {
            boost += LOUNGE_ACCESS_BOOST;
        }
        if card.rewards_category(pref) {
            boost += REWARD_CATEGORY_BOOST;
        }
        if pref == LOW_FEE_TAG && card.annual_fee < LOW_FEE_THRESHOLD {
            boost += LOW_FEE_BOOST;
        }
    }
    boost
}

/// Converts a card's net value and the profile's preferences into the
/// two-sided scores and their Nash product.
///
/// The value score scales linearly against the best card of the batch
/// (`max_nav`, floored at 1 by the orchestrator); negative net values
/// contribute 0. The bank side rewards high-margin cards and offsets by how
/// far the applicant's credit score sits from the 750 reference point. The
/// Nash product is taken on the unrounded scores; all three are rounded to
/// 2 decimals for output.
pub fn calculate_scores(
    card: &Card,
    profile: &UserProfile,
    net_annual_value: f64,
    max_nav: f64,
) -> Scores {
    let value_score = if max_nav > 0.0 {
        (net_annual_value.max(0.0) / max_nav) * 10.0
    } else {
        0.0
    };

    let customer_score = (value_score * preference_boost(card, profile)).min(10.0);

    let profit_margin_score = card.margin() * 100.0;
    let credit_risk_factor = (f64::from(profile.credit_score) - 750.0) / 100.0;
    let bank_score = (profit_margin_score + credit_risk_factor).clamp(0.0, 10.0);

    Scores {
        customer_score: round2(customer_score),
        bank_score: round2(bank_score),
        nash_product: round2(customer_score * bank_score),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

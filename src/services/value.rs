use crate::models::{Card, CurrencyTable, MonthlySpending, NetValue, SpendCategory, ValueBreakdown};

const MONTHS_PER_YEAR: f64 = 12.0;

/// Candidate reward tags tried for each spending category, in priority
/// order; the first tag the card declares a rate for wins. Categories with
/// no entry (`other`) fall straight through to the card's default rate.
const CATEGORY_REWARD_TAGS: &[(SpendCategory, &[&str])] = &[
    (SpendCategory::Groceries, &["groceries"]),
    (
        SpendCategory::OnlineShopping,
        &[
            "online_shopping",
            "online_partners",
            "flipkart_myntra",
            "amazon_prime",
        ],
    ),
    (SpendCategory::Travel, &["travel"]),
    (SpendCategory::Dining, &["dining"]),
    (SpendCategory::Utilities, &["utilities"]),
    (SpendCategory::Fuel, &["fuel"]),
];

/// Reward tags tried for a spending category, in declared priority order
pub fn candidate_reward_tags(category: SpendCategory) -> &'static [&'static str] {
    CATEGORY_REWARD_TAGS
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, tags)| *tags)
        .unwrap_or(&[])
}

/// Computes a card's annualized net monetary value for the given spending.
///
/// Spending is INR-denominated, so rewards need no conversion; the fee and
/// perks are quoted in the card's currency and converted at `1 / rate`.
/// Cards with a currency the table cannot convert never pass eligibility,
/// so the conversion factor here falls back to zero rather than panicking.
pub fn net_annual_value(
    card: &Card,
    spending: &MonthlySpending,
    rates: &CurrencyTable,
) -> NetValue {
    let to_inr = rates
        .units_per_inr(&card.currency)
        .map(|rate| 1.0 / rate)
        .unwrap_or_default();

    let annual_fee_inr = card.annual_fee * to_inr;
    let perks_inr = card.perks() * to_inr;
    let default_rate = card.default_reward_rate();

    let mut total_rewards = 0.0;
    for (category, monthly) in spending.iter() {
        let annual = monthly * MONTHS_PER_YEAR;
        let rate = candidate_reward_tags(category)
            .iter()
            .find_map(|tag| card.reward_rate(tag))
            .unwrap_or(default_rate);
        total_rewards += annual * rate;
    }

    NetValue {
        net_value: total_rewards + perks_inr - annual_fee_inr,
        breakdown: ValueBreakdown {
            rewards: total_rewards.round() as i64,
            perks: perks_inr.round() as i64,
            fee: -(annual_fee_inr.round() as i64),
        },
    }
}

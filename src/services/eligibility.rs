use crate::models::{Card, CurrencyTable, UserProfile};

/// Checks whether one card is open to the given profile.
///
/// Income is compared in the card's own currency; a card whose currency the
/// table cannot convert never qualifies (catalog/table integrity is the
/// providers' job).
pub fn is_eligible(profile: &UserProfile, card: &Card, rates: &CurrencyTable) -> bool {
    let Some(rate) = rates.units_per_inr(&card.currency) else {
        return false;
    };

    let income_in_card_currency = profile.income * rate;
    if income_in_card_currency < card.min_income {
        return false;
    }
    if profile.credit_score < card.min_credit_score {
        return false;
    }
    if !profile.preferred_tiers.is_empty() && !profile.preferred_tiers.contains(&card.tier) {
        return false;
    }
    true
}

/// Narrows the catalog to cards the profile qualifies for, preserving
/// catalog order. Empty input or no qualifying cards yields an empty result.
pub fn eligible_cards<'a>(
    profile: &UserProfile,
    catalog: &'a [Card],
    rates: &CurrencyTable,
) -> Vec<&'a Card> {
    catalog
        .iter()
        .filter(|card| is_eligible(profile, card, rates))
        .collect()
}

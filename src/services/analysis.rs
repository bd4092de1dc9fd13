use std::cmp::Ordering;

use crate::models::{Analysis, Card, CurrencyTable, NetValue, ScoredCard, UserProfile};
use crate::services::{eligibility, scoring, value};

/// How many of the top-ranked cards become recommendations
pub const TOP_RECOMMENDATIONS: usize = 4;

/// Floor for the batch maximum net value, so relative scaling never
/// divides by zero
const MAX_NAV_FLOOR: f64 = 1.0;

/// Runs the end-to-end recommendation pipeline: eligibility filter, value
/// calculation, two-sided scoring against the shared batch maximum, and
/// ranking by Nash product (net value breaking ties).
///
/// Returns the top picks plus the full sorted scored set. A profile no card
/// qualifies for yields empty collections, not an error. Pure function of
/// its inputs; inputs are never mutated and repeated calls produce
/// identical output.
pub fn run_full_analysis(
    profile: &UserProfile,
    catalog: &[Card],
    rates: &CurrencyTable,
) -> Analysis {
    let eligible = eligibility::eligible_cards(profile, catalog, rates);
    if eligible.is_empty() {
        return Analysis::default();
    }

    let valued: Vec<(&Card, NetValue)> = eligible
        .into_iter()
        .map(|card| (card, value::net_annual_value(card, &profile.spending, rates)))
        .collect();

    let max_nav = valued
        .iter()
        .map(|(_, nav)| nav.net_value)
        .fold(MAX_NAV_FLOOR, f64::max);

    let mut all_scored_cards: Vec<ScoredCard> = valued
        .into_iter()
        .map(|(card, nav)| {
            let scores = scoring::calculate_scores(card, profile, nav.net_value, max_nav);
            ScoredCard {
                card: card.clone(),
                net_annual_value: nav.net_value,
                breakdown: nav.breakdown,
                scores,
            }
        })
        .collect();

    all_scored_cards.sort_by(|a, b| {
        b.scores
            .nash_product
            .partial_cmp(&a.scores.nash_product)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                b.net_annual_value
                    .partial_cmp(&a.net_annual_value)
                    .unwrap_or(Ordering::Equal)
            })
    });

    let recommendations = all_scored_cards
        .iter()
        .take(TOP_RECOMMENDATIONS)
        .cloned()
        .collect();

    Analysis {
        recommendations,
        all_scored_cards,
    }
}

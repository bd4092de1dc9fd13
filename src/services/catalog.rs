use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::{Card, CardTier};

/// Catalog browse selection. Absent dimensions mean "all"; present ones are
/// exact matches combined conjunctively.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CatalogFilter {
    pub tier: Option<CardTier>,
    pub issuer: Option<String>,
    pub country: Option<String>,
}

impl CatalogFilter {
    fn matches(&self, card: &Card) -> bool {
        if let Some(tier) = self.tier {
            if card.tier != tier {
                return false;
            }
        }
        if let Some(issuer) = &self.issuer {
            if &card.issuer != issuer {
                return false;
            }
        }
        if let Some(country) = &self.country {
            if &card.country != country {
                return false;
            }
        }
        true
    }
}

/// Dropdown options consistent with the current selection
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilterOptions {
    pub issuers: Vec<String>,
    pub countries: Vec<String>,
}

/// Narrows the catalog to the current selection, preserving order
pub fn filter_cards<'a>(cards: &'a [Card], filter: &CatalogFilter) -> Vec<&'a Card> {
    cards.iter().filter(|card| filter.matches(card)).collect()
}

/// Computes the issuer and country options still reachable from the current
/// selection. Each dimension is computed with its own constraint dropped, so
/// picking an issuer never empties the issuer dropdown itself.
pub fn filter_options(cards: &[Card], filter: &CatalogFilter) -> FilterOptions {
    let issuer_scope = CatalogFilter {
        issuer: None,
        ..filter.clone()
    };
    let country_scope = CatalogFilter {
        country: None,
        ..filter.clone()
    };

    let issuers: BTreeSet<String> = cards
        .iter()
        .filter(|card| issuer_scope.matches(card))
        .map(|card| card.issuer.clone())
        .collect();
    let countries: BTreeSet<String> = cards
        .iter()
        .filter(|card| country_scope.matches(card))
        .map(|card| card.country.clone())
        .collect();

    FilterOptions {
        issuers: issuers.into_iter().collect(),
        countries: countries.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, issuer: &str, country: &str, tier: &str) -> Card {
        serde_json::from_value(serde_json::json!({
            "CardName": name,
            "Issuer": issuer,
            "Country": country,
            "Currency": "INR",
            "CardTier": tier,
            "MinIncome": 0.0,
            "MinCreditScore": 300,
            "AnnualFee": 0.0
        }))
        .unwrap()
    }

    fn catalog() -> Vec<Card> {
        vec![
            card("A", "HDFC Bank", "IN", "Premium"),
            card("B", "HDFC Bank", "IN", "Standard"),
            card("C", "Chase", "US", "Premium"),
            card("D", "Amex", "US", "Super-Premium"),
        ]
    }

    #[test]
    fn test_empty_filter_returns_everything() {
        let cards = catalog();
        assert_eq!(filter_cards(&cards, &CatalogFilter::default()).len(), 4);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let cards = catalog();
        let filter = CatalogFilter {
            tier: Some(CardTier::Premium),
            country: Some("IN".to_string()),
            issuer: None,
        };
        let names: Vec<&str> = filter_cards(&cards, &filter)
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["A"]);
    }

    #[test]
    fn test_options_sorted_and_deduplicated() {
        let options = filter_options(&catalog(), &CatalogFilter::default());
        assert_eq!(options.issuers, vec!["Amex", "Chase", "HDFC Bank"]);
        assert_eq!(options.countries, vec!["IN", "US"]);
    }

    #[test]
    fn test_options_drop_their_own_dimension() {
        // With Chase selected, the issuer dropdown must still offer the
        // other US issuers, while countries narrow to Chase's.
        let filter = CatalogFilter {
            issuer: Some("Chase".to_string()),
            ..Default::default()
        };
        let options = filter_options(&catalog(), &filter);
        assert_eq!(options.issuers, vec!["Amex", "Chase", "HDFC Bank"]);
        assert_eq!(options.countries, vec!["US"]);
    }

    #[test]
    fn test_options_respect_other_dimensions() {
        let filter = CatalogFilter {
            tier: Some(CardTier::Premium),
            ..Default::default()
        };
        let options = filter_options(&catalog(), &filter);
        assert_eq!(options.issuers, vec!["Chase", "HDFC Bank"]);
        assert_eq!(options.countries, vec!["IN", "US"]);
    }
}

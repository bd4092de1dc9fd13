use std::collections::HashMap;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::CurrencyTable,
    services::providers::RateProvider,
};

/// Static fallback factors (units per 1 INR), used whenever the live fetch
/// fails. Must cover every currency the bundled catalogs use.
const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD", 0.012),
    ("GBP", 0.0095),
    ("EUR", 0.011),
    ("CAD", 0.016),
    ("AUD", 0.018),
    ("SGD", 0.016),
    ("JPY", 1.8),
    ("AED", 0.044),
    ("INR", 1.0),
    ("HKD", 0.094),
    ("KRW", 16.5),
    ("BRL", 0.065),
];

/// Shape of the exchangerate-api "latest" response
#[derive(Debug, Deserialize)]
struct RatesResponse {
    rates: HashMap<String, f64>,
}

/// Currency table provider backed by an INR-based exchange rate API
pub struct ExchangeRateProvider {
    http_client: HttpClient,
    api_url: String,
}

impl ExchangeRateProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }

    /// The static fallback table
    pub fn fallback_table() -> CurrencyTable {
        CurrencyTable::new(
            FALLBACK_RATES
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        )
    }

    async fn fetch_live(&self) -> AppResult<CurrencyTable> {
        let response = self.http_client.get(&self.api_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Currency API returned status {}: {}",
                status, body
            )));
        }

        let parsed: RatesResponse = response.json().await?;
        Ok(CurrencyTable::new(parsed.rates))
    }
}

#[async_trait::async_trait]
impl RateProvider for ExchangeRateProvider {
    async fn fetch_rates(&self) -> CurrencyTable {
        match self.fetch_live().await {
            Ok(table) => {
                tracing::info!(
                    currencies = table.rates.len(),
                    provider = self.name(),
                    "Currency rates fetched"
                );
                table
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    provider = self.name(),
                    "Currency fetch failed, using static fallback table"
                );
                Self::fallback_table()
            }
        }
    }

    fn name(&self) -> &'static str {
        "exchange-rate-api"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_table_covers_expected_currencies() {
        let table = ExchangeRateProvider::fallback_table();
        for code in [
            "USD", "GBP", "EUR", "CAD", "AUD", "SGD", "JPY", "AED", "INR", "HKD", "KRW", "BRL",
        ] {
            assert!(table.units_per_inr(code).is_some(), "missing {}", code);
        }
        assert_eq!(table.units_per_inr("INR"), Some(1.0));
        assert_eq!(table.units_per_inr("USD"), Some(0.012));
    }

    #[test]
    fn test_rates_response_deserialization() {
        let json = r#"{
            "base": "INR",
            "date": "2024-01-15",
            "rates": { "USD": 0.012, "INR": 1.0 }
        }"#;
        let parsed: RatesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.rates.get("USD"), Some(&0.012));
        assert_eq!(parsed.rates.len(), 2);
    }
}

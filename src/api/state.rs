use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{Card, CurrencyTable};
use crate::services::providers::{CardProvider, ExplanationProvider, RateProvider};

/// Shared application state: the external providers plus the snapshots they
/// produce. The snapshots are explicit state owned here and handed to each
/// request, not process-wide globals.
#[derive(Clone)]
pub struct AppState {
    rate_provider: Arc<dyn RateProvider>,
    card_provider: Arc<dyn CardProvider>,
    pub explanation_provider: Option<Arc<dyn ExplanationProvider>>,
    snapshots: Arc<RwLock<Snapshots>>,
}

#[derive(Default)]
struct Snapshots {
    rates: Option<CurrencyTable>,
    catalog: Option<Vec<Card>>,
}

impl AppState {
    pub fn new(
        rate_provider: Arc<dyn RateProvider>,
        card_provider: Arc<dyn CardProvider>,
        explanation_provider: Option<Arc<dyn ExplanationProvider>>,
    ) -> Self {
        Self {
            rate_provider,
            card_provider,
            explanation_provider,
            snapshots: Arc::new(RwLock::new(Snapshots::default())),
        }
    }

    /// The currency table, fetched on first use and reused afterwards.
    /// Infallible: the provider substitutes its fallback table on failure.
    pub async fn currency_table(&self) -> CurrencyTable {
        if let Some(table) = self.snapshots.read().await.rates.clone() {
            return table;
        }
        let table = self.rate_provider.fetch_rates().await;
        self.snapshots.write().await.rates = Some(table.clone());
        table
    }

    /// The card catalog, fetched on first use and reused afterwards.
    /// Fetch failures are returned to the caller and not cached, so the
    /// next request retries.
    pub async fn catalog(&self) -> AppResult<Vec<Card>> {
        if let Some(cards) = self.snapshots.read().await.catalog.clone() {
            return Ok(cards);
        }
        let cards = self.card_provider.fetch_cards().await?;
        self.snapshots.write().await.catalog = Some(cards.clone());
        Ok(cards)
    }
}

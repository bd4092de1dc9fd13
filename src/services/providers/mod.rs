/// External data provider abstractions
///
/// The engine consumes fully-resolved inputs; these traits cover the
/// collaborators that resolve them: the currency table, the global card
/// catalog, and the optional AI explanation backend. Keeping them behind
/// traits lets the HTTP layer and tests swap in static sources.
use crate::{
    error::AppResult,
    models::{Card, CurrencyTable},
};

pub mod exchange_rate;
pub mod gemini;
pub mod global_cards;

pub use exchange_rate::ExchangeRateProvider;
pub use gemini::GeminiProvider;
pub use global_cards::GlobalCardProvider;

/// Source of the currency table.
///
/// Infallible by contract: implementations substitute a static fallback
/// table on fetch failure instead of propagating an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync {
    /// Returns currency factors as units per 1 INR
    async fn fetch_rates(&self) -> CurrencyTable;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// Source of the global card catalog.
///
/// An empty catalog is a valid (if useless) result, not an error; fetch
/// failures surface as errors for the HTTP layer to map.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CardProvider: Send + Sync {
    /// Returns the ordered list of card records
    async fn fetch_cards(&self) -> AppResult<Vec<Card>>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

/// AI text backend for comparative analyses.
///
/// Failures are expected and non-fatal; the caller falls back to the
/// deterministic standard explanation.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ExplanationProvider: Send + Sync {
    /// Generates explanatory text for the given prompt
    async fn generate(&self, prompt: &str) -> AppResult<String>;

    /// Provider name for logging
    fn name(&self) -> &'static str;
}

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use cardwise_api::api::{create_router, AppState};
use cardwise_api::config::Config;
use cardwise_api::services::providers::{
    ExchangeRateProvider, ExplanationProvider, GeminiProvider, GlobalCardProvider,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    let rate_provider = Arc::new(ExchangeRateProvider::new(config.currency_api_url.clone()));
    let card_provider = Arc::new(GlobalCardProvider::new(config.card_api_url.clone()));
    let explanation_provider: Option<Arc<dyn ExplanationProvider>> =
        config.google_ai_api_key.clone().map(|key| {
            Arc::new(GeminiProvider::new(
                config.gemini_api_url.clone(),
                key,
                config.gemini_model.clone(),
            )) as Arc<dyn ExplanationProvider>
        });

    if explanation_provider.is_none() {
        tracing::info!("No Google AI key configured, explanations use the standard template");
    }

    let state = AppState::new(rate_provider, card_provider, explanation_provider);
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "cardwise-api listening");
    axum::serve(listener, app).await?;

    Ok(())
}

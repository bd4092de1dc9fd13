use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::Card,
    services::providers::CardProvider,
};

/// Card catalog provider backed by the global card API
pub struct GlobalCardProvider {
    http_client: HttpClient,
    api_url: String,
}

impl GlobalCardProvider {
    pub fn new(api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CardProvider for GlobalCardProvider {
    async fn fetch_cards(&self) -> AppResult<Vec<Card>> {
        let response = self.http_client.get(&self.api_url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Card API returned status {}: {}",
                status, body
            )));
        }

        let cards: Vec<Card> = response.json().await?;
        tracing::info!(
            count = cards.len(),
            provider = self.name(),
            "Card catalog fetched"
        );
        Ok(cards)
    }

    fn name(&self) -> &'static str {
        "global-card-api"
    }
}

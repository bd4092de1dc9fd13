use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    services::providers::ExplanationProvider,
};

const TEMPERATURE: f64 = 0.4;
const TOP_P: f64 = 0.95;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    role: Option<String>,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Explanation provider backed by the Gemini generateContent endpoint
pub struct GeminiProvider {
    http_client: HttpClient,
    api_url: String,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_url: String, api_key: String, model: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            api_key,
            model,
        }
    }
}

#[async_trait::async_trait]
impl ExplanationProvider for GeminiProvider {
    async fn generate(&self, prompt: &str) -> AppResult<String> {
        let url = format!("{}/models/{}:generateContent", self.api_url, self.model);

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
                top_p: TOP_P,
            },
        };

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Gemini API returned status {}: {}",
                status, body
            )));
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text);

        match text {
            Some(text) if !text.is_empty() => {
                tracing::info!(
                    chars = text.len(),
                    provider = self.name(),
                    "Explanation generated"
                );
                Ok(text)
            }
            _ => Err(AppError::ExternalApi(
                "Gemini response contained no text".to_string(),
            )),
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

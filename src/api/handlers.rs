use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Analysis, Card, CardTier, CurrencyTable, MonthlySpending, UserProfile};
use crate::services::{
    analysis,
    catalog::{self, CatalogFilter, FilterOptions},
    explain::{self, RecommendationSummary},
};

use super::AppState;

// Request/Response types

/// Profile fields as submitted by the recommendation form
#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Annual income in INR
    pub income: f64,
    /// Ignored when `new_to_credit` is set; the profile is pinned to 300
    #[serde(default)]
    pub credit_score: u16,
    #[serde(default)]
    pub spending: MonthlySpending,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default)]
    pub preferred_tiers: Vec<CardTier>,
    #[serde(default)]
    pub new_to_credit: bool,
}

impl RecommendationRequest {
    fn validate(&self) -> AppResult<()> {
        if self.income < 0.0 {
            return Err(AppError::InvalidInput(
                "income must be non-negative".to_string(),
            ));
        }
        if self.spending.iter().any(|(_, amount)| amount < 0.0) {
            return Err(AppError::InvalidInput(
                "spending amounts must be non-negative".to_string(),
            ));
        }
        if !self.new_to_credit && !(300..=850).contains(&self.credit_score) {
            return Err(AppError::InvalidInput(
                "credit score must be between 300 and 850".to_string(),
            ));
        }
        Ok(())
    }

    fn into_profile(self) -> UserProfile {
        UserProfile::new(
            self.income,
            self.credit_score,
            self.spending,
            self.preferences,
            self.preferred_tiers,
            self.new_to_credit,
        )
    }
}

/// Explanation input: the structured recommendation summaries plus the
/// profile fields the prompt mentions
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub recommendations: Vec<RecommendationSummary>,
    pub income: f64,
    #[serde(default)]
    pub credit_score: u16,
    #[serde(default)]
    pub spending: MonthlySpending,
    #[serde(default)]
    pub new_to_credit: bool,
}

#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    pub explanation: String,
    pub source: ExplanationSource,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExplanationSource {
    Ai,
    Standard,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Runs the full recommendation analysis for the submitted profile.
///
/// A profile no card qualifies for is a valid outcome and returns empty
/// collections, not an error.
pub async fn recommend(
    State(state): State<AppState>,
    Json(request): Json<RecommendationRequest>,
) -> AppResult<Json<Analysis>> {
    request.validate()?;

    let cards = state.catalog().await?;
    let rates = state.currency_table().await;
    let profile = request.into_profile();

    let outcome = analysis::run_full_analysis(&profile, &cards, &rates);
    tracing::info!(
        catalog = cards.len(),
        eligible = outcome.all_scored_cards.len(),
        recommended = outcome.recommendations.len(),
        "Recommendation analysis completed"
    );

    Ok(Json(outcome))
}

/// Generates the comparative explanation for a set of recommendations.
///
/// Decoupled from scoring: the caller passes back the structured summaries
/// it already holds. The AI provider is optional and best-effort; any
/// failure falls back to the standard template.
pub async fn explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> AppResult<Json<ExplainResponse>> {
    if request.recommendations.is_empty() {
        return Err(AppError::InvalidInput(
            "at least one recommendation is required".to_string(),
        ));
    }

    let fallback = explain::standard_explanation(&request.recommendations, request.new_to_credit);
    let Some(provider) = &state.explanation_provider else {
        return Ok(Json(ExplainResponse {
            explanation: fallback,
            source: ExplanationSource::Standard,
        }));
    };

    let profile = UserProfile::new(
        request.income,
        request.credit_score,
        request.spending,
        Vec::new(),
        Vec::new(),
        request.new_to_credit,
    );
    let prompt = explain::comparative_prompt(&request.recommendations, &profile);

    match provider.generate(&prompt).await {
        Ok(text) => Ok(Json(ExplainResponse {
            explanation: text,
            source: ExplanationSource::Ai,
        })),
        Err(e) => {
            tracing::warn!(
                error = %e,
                provider = provider.name(),
                "AI explanation failed, using standard template"
            );
            Ok(Json(ExplainResponse {
                explanation: fallback,
                source: ExplanationSource::Standard,
            }))
        }
    }
}

/// Catalog browse with optional tier/issuer/country filters
pub async fn browse_cards(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> AppResult<Json<Vec<Card>>> {
    let cards = state.catalog().await?;
    let filtered: Vec<Card> = catalog::filter_cards(&cards, &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// Filter options consistent with the current catalog selection
pub async fn card_filters(
    State(state): State<AppState>,
    Query(filter): Query<CatalogFilter>,
) -> AppResult<Json<FilterOptions>> {
    let cards = state.catalog().await?;
    Ok(Json(catalog::filter_options(&cards, &filter)))
}

/// The currency table in use
pub async fn rates(State(state): State<AppState>) -> Json<CurrencyTable> {
    Json(state.currency_table().await)
}

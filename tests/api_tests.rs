use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use serde_json::json;

use cardwise_api::api::{create_router, AppState};
use cardwise_api::error::{AppError, AppResult};
use cardwise_api::models::{Card, CurrencyTable};
use cardwise_api::services::providers::{
    CardProvider, ExchangeRateProvider, ExplanationProvider, RateProvider,
};

struct StaticRates;

#[async_trait]
impl RateProvider for StaticRates {
    async fn fetch_rates(&self) -> CurrencyTable {
        ExchangeRateProvider::fallback_table()
    }

    fn name(&self) -> &'static str {
        "static-rates"
    }
}

struct StaticCards(Vec<Card>);

#[async_trait]
impl CardProvider for StaticCards {
    async fn fetch_cards(&self) -> AppResult<Vec<Card>> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &'static str {
        "static-cards"
    }
}

struct FailingCards;

#[async_trait]
impl CardProvider for FailingCards {
    async fn fetch_cards(&self) -> AppResult<Vec<Card>> {
        Err(AppError::ExternalApi("card API down".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing-cards"
    }
}

struct CannedExplanations(Option<&'static str>);

#[async_trait]
impl ExplanationProvider for CannedExplanations {
    async fn generate(&self, _prompt: &str) -> AppResult<String> {
        match self.0 {
            Some(text) => Ok(text.to_string()),
            None => Err(AppError::ExternalApi("model overloaded".to_string())),
        }
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn sample_catalog() -> Vec<Card> {
    serde_json::from_value(json!([
        {
            "CardName": "Millennia",
            "Issuer": "HDFC Bank",
            "Country": "IN",
            "Currency": "INR",
            "CardTier": "Entry-Level",
            "MinIncome": 300000.0,
            "MinCreditScore": 700,
            "AnnualFee": 1000.0,
            "PerksValue": 500.0,
            "RewardCategories": ["online_shopping"],
            "reward_rates": [
                { "category": "online_partners", "rate": 0.05 },
                { "category": "default", "rate": 0.01 }
            ]
        },
        {
            "CardName": "Regalia Gold",
            "Issuer": "HDFC Bank",
            "Country": "IN",
            "Currency": "INR",
            "CardTier": "Premium",
            "MinIncome": 500000.0,
            "MinCreditScore": 750,
            "AnnualFee": 2500.0,
            "PerksValue": 5000.0,
            "ProfitMargin": 0.07,
            "LoungeAccess": true,
            "RewardCategories": ["travel", "dining"],
            "reward_rates": [
                { "category": "travel", "rate": 0.05 },
                { "category": "dining", "rate": 0.03 },
                { "category": "default", "rate": 0.013 }
            ]
        },
        {
            "CardName": "Platinum Rewards",
            "Issuer": "SBI Card",
            "Country": "IN",
            "Currency": "INR",
            "CardTier": "Standard",
            "MinIncome": 350000.0,
            "MinCreditScore": 720,
            "AnnualFee": 499.0,
            "RewardCategories": ["groceries"],
            "reward_rates": [
                { "category": "groceries", "rate": 0.02 },
                { "category": "default", "rate": 0.005 }
            ]
        },
        {
            "CardName": "Sapphire Preferred",
            "Issuer": "Chase",
            "Country": "US",
            "Currency": "USD",
            "CardTier": "Premium",
            "MinIncome": 60000.0,
            "MinCreditScore": 720,
            "AnnualFee": 95.0,
            "PerksValue": 150.0,
            "LoungeAccess": true,
            "RewardCategories": ["travel", "dining"],
            "reward_rates": [
                { "category": "travel", "rate": 0.05 },
                { "category": "dining", "rate": 0.03 },
                { "category": "default", "rate": 0.01 }
            ]
        },
        {
            "CardName": "Ace",
            "Issuer": "Axis Bank",
            "Country": "IN",
            "Currency": "INR",
            "CardTier": "Entry-Level",
            "MinIncome": 250000.0,
            "MinCreditScore": 650,
            "AnnualFee": 499.0,
            "ProfitMargin": 0.04,
            "RewardCategories": ["utilities"],
            "reward_rates": [
                { "category": "utilities", "rate": 0.05 },
                { "category": "default", "rate": 0.015 }
            ]
        }
    ]))
    .unwrap()
}

fn create_test_server(cards: Arc<dyn CardProvider>) -> TestServer {
    let state = AppState::new(Arc::new(StaticRates), cards, None);
    TestServer::new(create_router(state)).unwrap()
}

fn create_test_server_with_ai(ai: Arc<dyn ExplanationProvider>) -> TestServer {
    let state = AppState::new(
        Arc::new(StaticRates),
        Arc::new(StaticCards(sample_catalog())),
        Some(ai),
    );
    TestServer::new(create_router(state)).unwrap()
}

fn profile_body() -> serde_json::Value {
    json!({
        "income": 600000,
        "credit_score": 750,
        "spending": {
            "groceries": 5000,
            "online_shopping": 8000,
            "dining": 3000,
            "fuel": 2000
        }
    })
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommendation_flow() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .post("/api/v1/recommendations")
        .json(&profile_body())
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    let all = result["all_scored_cards"].as_array().unwrap();
    let recommended = result["recommendations"].as_array().unwrap();

    // Sapphire Preferred needs 60k USD; 600k INR converts to 7.2k USD
    assert_eq!(all.len(), 4);
    assert_eq!(recommended.len(), 4);
    assert!(all
        .iter()
        .all(|c| c["card"]["CardName"] != "Sapphire Preferred"));

    // Sorted by nash product, recommendations are the sorted prefix
    for pair in all.windows(2) {
        assert!(pair[0]["scores"]["nash_product"].as_f64().unwrap()
            >= pair[1]["scores"]["nash_product"].as_f64().unwrap());
    }
    for (rec, scored) in recommended.iter().zip(all.iter()) {
        assert_eq!(rec["card"]["CardName"], scored["card"]["CardName"]);
    }

    // Scores stay within the model's bounds
    for scored in all {
        let customer = scored["scores"]["customer_score"].as_f64().unwrap();
        let bank = scored["scores"]["bank_score"].as_f64().unwrap();
        let nash = scored["scores"]["nash_product"].as_f64().unwrap();
        assert!((0.0..=10.0).contains(&customer));
        assert!((0.0..=10.0).contains(&bank));
        assert!((0.0..=100.0).contains(&nash));
    }
}

#[tokio::test]
async fn test_unqualified_profile_gets_empty_result() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "income": 600000, "credit_score": 400 }))
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    assert!(result["recommendations"].as_array().unwrap().is_empty());
    assert!(result["all_scored_cards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_new_to_credit_profile_is_pinned_to_floor_score() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    // No credit_score supplied; every sample card requires at least 650
    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "income": 600000, "new_to_credit": true }))
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    assert!(result["all_scored_cards"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_profile_is_rejected() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "income": -1, "credit_score": 750 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/v1/recommendations")
        .json(&json!({ "income": 600000, "credit_score": 200 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_catalog_outage_maps_to_bad_gateway() {
    let server = create_test_server(Arc::new(FailingCards));

    let response = server
        .post("/api/v1/recommendations")
        .json(&profile_body())
        .await;
    response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_browse_cards_with_filters() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .get("/api/v1/cards")
        .add_query_param("tier", "Premium")
        .add_query_param("country", "IN")
        .await;
    response.assert_status_ok();

    let cards: Vec<serde_json::Value> = response.json();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0]["CardName"], "Regalia Gold");
}

#[tokio::test]
async fn test_filter_options_follow_selection() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .get("/api/v1/cards/filters")
        .add_query_param("tier", "Premium")
        .await;
    response.assert_status_ok();

    let options: serde_json::Value = response.json();
    let issuers = options["issuers"].as_array().unwrap();
    assert_eq!(issuers.len(), 2);
    assert_eq!(issuers[0], "Chase");
    assert_eq!(issuers[1], "HDFC Bank");
}

#[tokio::test]
async fn test_rates_endpoint_serves_the_table() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server.get("/api/v1/rates").await;
    response.assert_status_ok();

    let table: serde_json::Value = response.json();
    assert_eq!(table["rates"]["INR"], 1.0);
    assert_eq!(table["rates"]["USD"], 0.012);
}

#[tokio::test]
async fn test_explain_without_ai_uses_standard_template() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .post("/api/v1/recommendations/explain")
        .json(&json!({
            "recommendations": [
                { "card_name": "Regalia Gold", "net_annual_value": 9000.0 },
                { "card_name": "Millennia", "net_annual_value": 4300.0 }
            ],
            "income": 600000,
            "credit_score": 750
        }))
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    assert_eq!(result["source"], "standard");
    let text = result["explanation"].as_str().unwrap();
    assert!(text.contains("**Regalia Gold**"));
    assert!(text.contains("Millennia"));
}

#[tokio::test]
async fn test_explain_uses_ai_when_available() {
    let server = create_test_server_with_ai(Arc::new(CannedExplanations(Some(
        "#### Top Recommendation\nLive analysis",
    ))));

    let response = server
        .post("/api/v1/recommendations/explain")
        .json(&json!({
            "recommendations": [
                { "card_name": "Regalia Gold", "net_annual_value": 9000.0 }
            ],
            "income": 600000,
            "credit_score": 750
        }))
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    assert_eq!(result["source"], "ai");
    assert_eq!(result["explanation"], "#### Top Recommendation\nLive analysis");
}

#[tokio::test]
async fn test_explain_falls_back_when_ai_fails() {
    let server = create_test_server_with_ai(Arc::new(CannedExplanations(None)));

    let response = server
        .post("/api/v1/recommendations/explain")
        .json(&json!({
            "recommendations": [
                { "card_name": "Regalia Gold", "net_annual_value": 9000.0 }
            ],
            "income": 600000,
            "credit_score": 750,
            "new_to_credit": false
        }))
        .await;
    response.assert_status_ok();

    let result: serde_json::Value = response.json();
    assert_eq!(result["source"], "standard");
    assert!(result["explanation"]
        .as_str()
        .unwrap()
        .contains("**Regalia Gold**"));
}

#[tokio::test]
async fn test_explain_requires_recommendations() {
    let server = create_test_server(Arc::new(StaticCards(sample_catalog())));

    let response = server
        .post("/api/v1/recommendations/explain")
        .json(&json!({ "recommendations": [], "income": 600000 }))
        .await;
    response.assert_status(axum::http::StatusCode::BAD_REQUEST);
}

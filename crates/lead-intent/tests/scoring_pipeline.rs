use std::sync::Arc;

use lead_intent::config::LlmConfig;
use lead_intent::llm::GeminiClient;
use lead_intent::workflows::leads::LeadCsvImporter;
use lead_intent::workflows::scoring::{
    Intent, IntentClassifier, Offer, RuleEngine, ScoringPipeline,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL_PATH: &str = "/models/gemini-test:generateContent";

fn offer() -> Offer {
    Offer {
        name: "AI Outreach Automation".to_string(),
        value_props: vec!["24/7 outreach".to_string()],
        ideal_use_cases: vec!["B2B SaaS mid-market".to_string()],
    }
}

fn config_for(server: &MockServer) -> LlmConfig {
    LlmConfig {
        model: "gemini-test".to_string(),
        base_url: server.uri(),
        api_key_env: "LEAD_INTENT_IT_UNSET_KEY".to_string(),
        timeout: None,
    }
}

fn pipeline(client: GeminiClient) -> ScoringPipeline {
    ScoringPipeline::new(IntentClassifier::new(Arc::new(client)))
}

fn sample_leads() -> Vec<lead_intent::workflows::scoring::Lead> {
    let data = include_bytes!("fixtures/sample_leads.csv");
    LeadCsvImporter::from_reader(&data[..]).expect("fixture imports")
}

#[tokio::test]
async fn gemini_reply_flows_into_final_score() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Intent: Medium\nReasoning: Evaluating tools this quarter." }] }
            }]
        })))
        .mount(&server)
        .await;

    let pipeline = pipeline(GeminiClient::with_api_key(config_for(&server), "test-key"));
    let offer = offer();

    for lead in sample_leads() {
        let rule_score = RuleEngine.score(&lead, &offer);
        let result = pipeline.run(&lead, &offer).await;

        assert_eq!(result.intent, Intent::Medium);
        assert_eq!(result.score, rule_score + 30);
        assert_eq!(result.reasoning, "Evaluating tools this quarter.");
    }
}

#[tokio::test]
async fn missing_api_key_degrades_without_calling_the_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let pipeline = pipeline(GeminiClient::new(config_for(&server)));
    let offer = offer();

    for lead in sample_leads() {
        let state = pipeline.execute(&lead, &offer).await;
        let message = state.error_message().expect("failure recorded");
        assert!(message.contains("LEAD_INTENT_IT_UNSET_KEY"));

        let rule_score = state.rule_score();
        let result = state.into_result();
        assert_eq!(result.intent, Intent::Low);
        assert_eq!(result.score, rule_score + 10);
        assert!(result.reasoning.starts_with("AI error: "));
    }
}

#[tokio::test]
async fn malformed_service_payload_degrades() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MODEL_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = pipeline(GeminiClient::with_api_key(config_for(&server), "test-key"));
    let leads = sample_leads();

    let result = pipeline.run(&leads[0], &offer()).await;
    assert_eq!(result.intent, Intent::Low);
    assert!(result.reasoning.contains("invalid response"));
}

#[test]
fn fixture_rule_scores_cover_the_range() {
    let offer = offer();
    let scores: Vec<u8> = sample_leads()
        .iter()
        .map(|lead| RuleEngine.score(lead, &offer))
        .collect();

    // Head/overlap/complete, manager/none/complete, intern/none/blank bio,
    // CTO/"saas"/complete, associate/none/complete.
    assert_eq!(scores, vec![50, 20, 0, 40, 20]);
}

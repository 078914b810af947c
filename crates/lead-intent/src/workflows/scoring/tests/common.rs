use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::llm::{LanguageModel, LlmError, Prompt};
use crate::workflows::scoring::{
    IntentClassifier, Lead, LeadScoringService, Offer, ScoredResult, ScoringPipeline,
    SessionStore, StoreError,
};

pub(super) fn offer() -> Offer {
    Offer {
        name: "AI Outreach Automation".to_string(),
        value_props: vec![
            "24/7 outreach".to_string(),
            "6x more meetings".to_string(),
        ],
        ideal_use_cases: vec!["B2B SaaS mid-market".to_string()],
    }
}

pub(super) fn lead() -> Lead {
    Lead {
        name: "Ava Patel".to_string(),
        role: "Head of Growth".to_string(),
        company: "FlowMetrics".to_string(),
        industry: "B2B SaaS".to_string(),
        location: "Bengaluru".to_string(),
        linkedin_bio: "Scaling outbound for mid-market SaaS".to_string(),
    }
}

pub(super) fn lead_with_role(role: &str) -> Lead {
    Lead {
        role: role.to_string(),
        ..lead()
    }
}

pub(super) const HIGH_REPLY: &str = "Intent: High\nReasoning: Strong fit with ICP.";

pub(super) const LEADS_CSV: &str = "name,role,company,industry,location,linkedin_bio\n\
Ava Patel,Head of Growth,FlowMetrics,B2B SaaS,Bengaluru,Scaling outbound\n\
Liam Chen,Intern,Brightline,Retail,Austin,\n";

/// Replies with fixed text and records every prompt it receives.
#[derive(Default)]
pub(super) struct ScriptedModel {
    reply: String,
    prompts: Mutex<Vec<Prompt>>,
}

impl ScriptedModel {
    pub(super) fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(super) fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().expect("prompt mutex poisoned").clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.clone());
        Ok(self.reply.clone())
    }
}

/// Fails every call, counting attempts.
pub(super) struct FailingModel {
    error: fn() -> LlmError,
    calls: AtomicUsize,
}

impl FailingModel {
    pub(super) fn new(error: fn() -> LlmError) -> Self {
        Self {
            error,
            calls: AtomicUsize::new(0),
        }
    }

    pub(super) fn unreachable() -> Self {
        Self::new(|| LlmError::RequestFailed("connection refused".to_string()))
    }

    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LanguageModel for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err((self.error)())
    }
}

/// Sleeps before answering, for timeout tests.
pub(super) struct SlowModel(pub(super) Duration);

#[async_trait]
impl LanguageModel for SlowModel {
    fn name(&self) -> &str {
        "slow"
    }

    async fn complete(&self, _prompt: &Prompt) -> Result<String, LlmError> {
        tokio::time::sleep(self.0).await;
        Ok(HIGH_REPLY.to_string())
    }
}

pub(super) fn classifier_with(model: Arc<dyn LanguageModel>) -> IntentClassifier {
    IntentClassifier::new(model)
}

pub(super) fn pipeline_with(model: Arc<dyn LanguageModel>) -> ScoringPipeline {
    ScoringPipeline::new(classifier_with(model))
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    offer: Arc<Mutex<Option<Offer>>>,
    leads: Arc<Mutex<Vec<Lead>>>,
    results: Arc<Mutex<Vec<ScoredResult>>>,
}

impl SessionStore for MemoryStore {
    fn set_offer(&self, offer: Offer) -> Result<(), StoreError> {
        *self.offer.lock().expect("store mutex poisoned") = Some(offer);
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        Ok(self.offer.lock().expect("store mutex poisoned").clone())
    }

    fn replace_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError> {
        *self.leads.lock().expect("store mutex poisoned") = leads;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.leads.lock().expect("store mutex poisoned").clone())
    }

    fn replace_results(&self, results: Vec<ScoredResult>) -> Result<(), StoreError> {
        *self.results.lock().expect("store mutex poisoned") = results;
        Ok(())
    }

    fn results(&self) -> Result<Vec<ScoredResult>, StoreError> {
        Ok(self.results.lock().expect("store mutex poisoned").clone())
    }
}

pub(super) struct UnavailableStore;

impl SessionStore for UnavailableStore {
    fn set_offer(&self, _offer: Offer) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn replace_leads(&self, _leads: Vec<Lead>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn replace_results(&self, _results: Vec<ScoredResult>) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }

    fn results(&self) -> Result<Vec<ScoredResult>, StoreError> {
        Err(StoreError::Unavailable("store offline".to_string()))
    }
}

pub(super) fn build_service(
    model: Arc<dyn LanguageModel>,
) -> (LeadScoringService<MemoryStore>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let service = LeadScoringService::new(Arc::new(pipeline_with(model)), store.clone());
    (service, store)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

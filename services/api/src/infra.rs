use lead_intent::config::LlmConfig;
use lead_intent::llm::GeminiClient;
use lead_intent::workflows::scoring::{
    IntentClassifier, Lead, Offer, ScoredResult, ScoringPipeline, SessionStore, StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct Session {
    offer: Option<Offer>,
    leads: Vec<Lead>,
    results: Vec<ScoredResult>,
}

/// Process-lifetime session: one offer, one lead upload, one set of results.
#[derive(Default, Clone)]
pub(crate) struct InMemorySessionStore {
    session: Arc<Mutex<Session>>,
}

impl InMemorySessionStore {
    fn lock(&self) -> Result<MutexGuard<'_, Session>, StoreError> {
        self.session
            .lock()
            .map_err(|_| StoreError::Unavailable("session mutex poisoned".to_string()))
    }
}

impl SessionStore for InMemorySessionStore {
    fn set_offer(&self, offer: Offer) -> Result<(), StoreError> {
        self.lock()?.offer = Some(offer);
        Ok(())
    }

    fn offer(&self) -> Result<Option<Offer>, StoreError> {
        Ok(self.lock()?.offer.clone())
    }

    fn replace_leads(&self, leads: Vec<Lead>) -> Result<(), StoreError> {
        self.lock()?.leads = leads;
        Ok(())
    }

    fn leads(&self) -> Result<Vec<Lead>, StoreError> {
        Ok(self.lock()?.leads.clone())
    }

    fn replace_results(&self, results: Vec<ScoredResult>) -> Result<(), StoreError> {
        self.lock()?.results = results;
        Ok(())
    }

    fn results(&self) -> Result<Vec<ScoredResult>, StoreError> {
        Ok(self.lock()?.results.clone())
    }
}

/// Pipeline backed by the Gemini client described in `config`.
pub(crate) fn build_pipeline(config: &LlmConfig) -> ScoringPipeline {
    let client = GeminiClient::new(config.clone());
    let classifier = IntentClassifier::new(Arc::new(client)).with_timeout(config.timeout);
    ScoringPipeline::new(classifier)
}

//! AI intent classification: prompt rendering, the single model call, reply parsing and
//! graceful degradation when the model cannot be used.

mod parser;
mod prompt;

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::llm::{LanguageModel, LlmError};
use crate::workflows::scoring::domain::{Intent, Lead, Offer};

pub use parser::{parse_response, IntentVerdict};
pub(crate) use prompt::build_prompt;

/// Why a classification fell back to the default verdict.
#[derive(Debug, thiserror::Error)]
pub enum ClassificationFailure {
    #[error("language model credentials missing: {0}")]
    MissingCredentials(String),
    #[error(transparent)]
    Service(LlmError),
    #[error("language model call timed out after {0:?}")]
    TimedOut(Duration),
}

impl From<LlmError> for ClassificationFailure {
    fn from(value: LlmError) -> Self {
        match value {
            LlmError::NotConfigured(message) => Self::MissingCredentials(message),
            other => Self::Service(other),
        }
    }
}

/// Outcome of one classification attempt.
#[derive(Debug)]
pub enum Classification {
    Parsed(IntentVerdict),
    Degraded {
        verdict: IntentVerdict,
        failure: ClassificationFailure,
    },
}

impl Classification {
    pub(crate) fn degraded(failure: ClassificationFailure) -> Self {
        let verdict = IntentVerdict::new(Intent::Low, format!("AI error: {failure}"));
        Self::Degraded { verdict, failure }
    }

    pub fn verdict(&self) -> &IntentVerdict {
        match self {
            Classification::Parsed(verdict) | Classification::Degraded { verdict, .. } => verdict,
        }
    }

    pub fn failure(&self) -> Option<&ClassificationFailure> {
        match self {
            Classification::Parsed(_) => None,
            Classification::Degraded { failure, .. } => Some(failure),
        }
    }

    pub fn into_parts(self) -> (IntentVerdict, Option<ClassificationFailure>) {
        match self {
            Classification::Parsed(verdict) => (verdict, None),
            Classification::Degraded { verdict, failure } => (verdict, Some(failure)),
        }
    }
}

/// Asks the language model for a High/Medium/Low verdict on a lead.
#[derive(Clone)]
pub struct IntentClassifier {
    model: Arc<dyn LanguageModel>,
    timeout: Option<Duration>,
}

impl IntentClassifier {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            timeout: None,
        }
    }

    /// Bound the model call. Expiry degrades like any other failure.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Classify one lead. Makes exactly one model call and never returns an error;
    /// failures come back as [`Classification::Degraded`].
    pub async fn classify(&self, lead: &Lead, offer: &Offer) -> Classification {
        let prompt = build_prompt(lead, offer);

        let reply = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, self.model.complete(&prompt)).await {
                Ok(result) => result.map_err(ClassificationFailure::from),
                Err(_) => Err(ClassificationFailure::TimedOut(limit)),
            },
            None => self
                .model
                .complete(&prompt)
                .await
                .map_err(ClassificationFailure::from),
        };

        match reply {
            Ok(text) => Classification::Parsed(parse_response(&text)),
            Err(failure) => {
                warn!(
                    model = %self.model.name(),
                    lead = %lead.name,
                    error = %failure,
                    "intent classification degraded"
                );
                Classification::degraded(failure)
            }
        }
    }
}

impl std::fmt::Debug for IntentClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntentClassifier")
            .field("model", &self.model.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

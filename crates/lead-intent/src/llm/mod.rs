//! Language-model access used by the intent classifier.
//!
//! [`LanguageModel`] is the seam the scoring pipeline depends on; [`GeminiClient`] is the
//! production implementation speaking the Gemini `generateContent` REST API.

mod error;
mod gemini;

use async_trait::async_trait;

pub use error::LlmError;
pub use gemini::GeminiClient;

/// A single request to the model: a system instruction plus one user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Anything that can turn a [`Prompt`] into a plain-text reply.
///
/// Implementations perform exactly one attempt per call; retries are not part of the
/// contract.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError>;
}

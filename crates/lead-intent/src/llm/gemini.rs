use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{LanguageModel, LlmError, Prompt};
use crate::config::LlmConfig;

/// Client for the Gemini `models/{model}:generateContent` endpoint.
///
/// The API key is resolved per request: an explicit key wins, otherwise the variable
/// named by [`LlmConfig::api_key_env`] is read.
pub struct GeminiClient {
    config: LlmConfig,
    http: reqwest::Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: None,
        }
    }

    pub fn with_api_key(config: LlmConfig, api_key: impl Into<String>) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            api_key: Some(api_key.into()),
        }
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint_url(&self) -> String {
        let base = self.config.base_url.trim_end_matches('/');
        format!("{base}/models/{}:generateContent", self.config.model)
    }

    fn resolve_api_key(&self) -> Result<String, LlmError> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }

        std::env::var(&self.config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::NotConfigured(format!(
                    "{} not set. Define it in environment or .env file",
                    self.config.api_key_env
                ))
            })
    }
}

#[async_trait]
impl LanguageModel for GeminiClient {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, prompt: &Prompt) -> Result<String, LlmError> {
        let api_key = self.resolve_api_key()?;
        let url = self.endpoint_url();

        debug!(model = %self.config.model, "sending generateContent request");

        let body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &prompt.system,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: &prompt.user }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthFailed(body),
                _ => LlmError::RequestFailed(format!("HTTP {status}: {body}")),
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("failed to parse response: {e}")))?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        debug!(model = %self.config.model, chars = text.len(), "generateContent response received");
        Ok(text)
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.config.model)
            .field("base_url", &self.config.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

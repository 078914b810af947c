use thiserror::Error;

/// Failures talking to the language-model service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// Credentials are missing, e.g. the API key variable is unset.
    #[error("language model not configured: {0}")]
    NotConfigured(String),

    /// The service rejected the credentials (HTTP 401/403).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// Any other non-success HTTP status.
    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The reply parsed but carried no text.
    #[error("empty response from language model")]
    EmptyResponse,

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

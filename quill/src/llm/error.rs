//! Errors raised by chat-model providers.

use thiserror::Error;

/// Failure originating from a chat-model provider.
///
/// Not retried anywhere in this crate. Auth failures and rate limits arrive as
/// [`ProviderError::Api`] with their HTTP status; see [`ProviderError::is_auth`] and
/// [`ProviderError::is_rate_limited`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request could not be sent or the connection failed.
    #[error("transport error: {0}")]
    Transport(String),

    /// Provider answered with a non-success HTTP status.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Response body did not have the expected shape.
    #[error("failed to parse response: {0}")]
    Parse(String),

    /// No API key configured for a provider that needs one.
    #[error("missing credentials: {0}")]
    MissingCredentials(String),

    /// An `LLM_*` variable is set but cannot be parsed.
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },

    /// Provider name in configuration is not known.
    #[error("unknown provider: {0} (use gemini, ollama, openai or mock)")]
    UnknownProvider(String),
}

impl ProviderError {
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingCredentials(_) | ProviderError::Api { status: 401 | 403, .. }
        )
    }

    pub fn is_rate_limited(&self) -> bool {
        matches!(self, ProviderError::Api { status: 429, .. })
    }
}

/// The request URL is stripped first; it can carry credentials.
impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        let e = e.without_url();
        if e.is_decode() {
            ProviderError::Parse(e.to_string())
        } else {
            ProviderError::Transport(e.to_string())
        }
    }
}

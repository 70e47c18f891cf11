//! Agent execution error types.
//!
//! Returned by `Node::run` and `LlmClient::invoke`. Provider failures keep their
//! structured form so callers can tell an auth failure from a rate limit.

use thiserror::Error;

use crate::llm::ProviderError;

/// Agent execution error.
///
/// Returned by a node step or a model call. The reflection loop never catches these;
/// they abort the run and reach the caller wrapped in `RunError::Execution`.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed with a message (e.g. a stub node or malformed response).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// The chat-model provider failed (network, HTTP status, parse, credentials).
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: Display format of ExecutionFailed contains "execution failed" and the message.
    #[test]
    fn agent_error_display_execution_failed() {
        let err = AgentError::ExecutionFailed("msg".to_string());
        let s = err.to_string();
        assert!(
            s.contains("execution failed"),
            "Display should contain 'execution failed': {}",
            s
        );
        assert!(s.contains("msg"), "Display should contain message: {}", s);
    }

    /// **Scenario**: A provider error converts via `?` and keeps the HTTP status in Display.
    #[test]
    fn agent_error_from_provider_error_keeps_status() {
        let err: AgentError = ProviderError::Api {
            status: 429,
            body: "slow down".to_string(),
        }
        .into();
        let s = err.to_string();
        assert!(s.contains("provider error"), "{}", s);
        assert!(s.contains("429"), "{}", s);
        assert!(matches!(err, AgentError::Provider(ProviderError::Api { status: 429, .. })));
    }
}

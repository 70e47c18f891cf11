//! LLM client abstraction for the generate and reflect nodes.
//!
//! Both nodes depend on one capability, "reply given history"; this module defines the
//! trait, the provider error type, and the concrete clients:
//!
//! - [`MockLlm`]: fixed or scripted replies for tests and examples.
//! - [`ChatGemini`]: Google Gemini `generateContent` REST API.
//! - [`ChatOllama`]: local Ollama `/api/chat`.
//! - [`ChatOpenAI`]: any OpenAI-compatible Chat Completions endpoint.
//!
//! Which one runs is decided by [`LlmConfig`] and [`build_llm`], never by a global instance.

mod config;
mod error;
mod gemini;
mod mock;
mod ollama;
mod openai;

pub use config::{build_llm, LlmConfig, LlmProvider};
pub use error::ProviderError;
pub use gemini::ChatGemini;
pub use mock::MockLlm;
pub use ollama::ChatOllama;
pub use openai::ChatOpenAI;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::AgentError;
use crate::message::Message;

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

impl LlmUsage {
    /// Field-wise sum, saturating at `u32::MAX`.
    pub fn add(&self, other: &LlmUsage) -> LlmUsage {
        LlmUsage {
            prompt_tokens: self.prompt_tokens.saturating_add(other.prompt_tokens),
            completion_tokens: self.completion_tokens.saturating_add(other.completion_tokens),
            total_tokens: self.total_tokens.saturating_add(other.total_tokens),
        }
    }
}

/// Response from an LLM completion: reply text and optional usage.
///
/// **Interaction**: Returned by `LlmClient::invoke()`; nodes turn `content` into one new message.
#[derive(Clone, Debug)]
pub struct LlmResponse {
    /// Reply content (plain text).
    pub content: String,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: None,
        }
    }
}

/// LLM client: given messages, returns the reply text.
///
/// One call per node step. Implementations do not retry; a failure is returned as
/// `AgentError::Provider` and the caller decides what to do.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Short provider name for logs and CLI output (e.g. `"gemini"`).
    fn provider(&self) -> &str;

    /// Model identifier sent to the provider.
    fn model(&self) -> &str;

    /// Invoke one turn: read messages (system prompt first, then history), return the reply.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}

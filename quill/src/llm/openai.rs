//! OpenAI Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works against the OpenAI API or any compatible endpoint (`OPENAI_BASE_URL`).
//! Requires `OPENAI_API_KEY` unless a config with a key is passed in.
//!
//! **Interaction**: Implements `LlmClient`; built by `build_llm` for `LlmProvider::OpenAI`.
//! Depends on `async_openai`.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessage,
        ChatCompletionRequestUserMessage, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ProviderError};
use crate::message::Message;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// OpenAI Chat Completions client (aligns with LangChain ChatOpenAI).
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client with custom config (e.g. custom API key or base URL).
    pub fn with_config(config: OpenAIConfig, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            model: model.into(),
            temperature: None,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Convert our `Message` list to OpenAI request messages.
    fn messages_to_request(messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| match m {
                Message::System(s) => ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessage::from(s.as_str()),
                ),
                Message::User(s) => ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessage::from(s.as_str()),
                ),
                Message::Assistant(s) => {
                    ChatCompletionRequestMessage::Assistant((s.as_str()).into())
                }
            })
            .collect()
    }
}

/// Maps an async-openai error onto the provider error kinds.
///
/// The API error body carries no HTTP status, so auth and rate-limit types are mapped to
/// 401 and 429; other API errors are reported as 400.
fn map_openai_error(e: OpenAIError) -> ProviderError {
    match e {
        OpenAIError::Reqwest(e) => ProviderError::Transport(e.to_string()),
        OpenAIError::ApiError(api) => {
            let status = match api.r#type.as_deref() {
                Some("authentication_error") | Some("invalid_api_key") => 401,
                Some("rate_limit_error") | Some("insufficient_quota") => 429,
                _ => 400,
            };
            ProviderError::Api {
                status,
                body: api.message,
            }
        }
        other => ProviderError::Parse(other.to_string()),
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    fn provider(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(Self::messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("OpenAI request build failed: {}", e))
        })?;

        let trace_id = uuid::Uuid::new_v4().to_string();
        debug!(
            trace_id = %trace_id,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            "OpenAI chat create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "OpenAI request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(map_openai_error)?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::Parse("OpenAI returned no choices".to_string()))?;
        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content: choice.message.content.unwrap_or_default(),
            usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_to_request_keeps_order_and_roles() {
        let out = ChatOpenAI::messages_to_request(&[
            Message::system("s"),
            Message::user("u"),
            Message::assistant("a"),
        ]);
        assert_eq!(out.len(), 3);
        assert!(matches!(out[0], ChatCompletionRequestMessage::System(_)));
        assert!(matches!(out[1], ChatCompletionRequestMessage::User(_)));
        assert!(matches!(out[2], ChatCompletionRequestMessage::Assistant(_)));
    }

    #[test]
    fn client_reports_provider_and_model() {
        let llm = ChatOpenAI::with_config(OpenAIConfig::new().with_api_key("k"), "gpt-4o-mini");
        assert_eq!(llm.provider(), "openai");
        assert_eq!(llm.model(), "gpt-4o-mini");
    }
}

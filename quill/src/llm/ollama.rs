//! Ollama client implementing `LlmClient` (ChatOllama).
//!
//! Non-streaming `POST {base}/api/chat`. No credentials; the base URL defaults to a local
//! daemon and can be overridden with `OLLAMA_BASE_URL` or `LlmConfig::base_url`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ProviderError};
use crate::message::Message;

pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1:8b";
pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama chat client.
///
/// **Interaction**: Implements `LlmClient`; built by `build_llm` for `LlmProvider::Ollama`.
pub struct ChatOllama {
    client: reqwest::Client,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct Options {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: String,
}

impl ChatOllama {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_OLLAMA_BASE_URL.to_string(),
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn request<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: match m {
                        Message::System(_) => "system",
                        Message::User(_) => "user",
                        Message::Assistant(_) => "assistant",
                    },
                    content: m.content(),
                })
                .collect(),
            stream: false,
            options: self.temperature.map(|temperature| Options { temperature }),
        }
    }
}

#[async_trait]
impl LlmClient for ChatOllama {
    fn provider(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let url = format!("{}/api/chat", self.base_url);
        let trace_id = uuid::Uuid::new_v4().to_string();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            "Ollama chat"
        );

        let response = self
            .client
            .post(&url)
            .json(&self.request(messages))
            .send()
            .await
            .map_err(ProviderError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let text = response.text().await.map_err(ProviderError::from)?;
        trace!(trace_id = %trace_id, response = %text, "Ollama response body");
        let parsed: ChatResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;
        let message = parsed
            .message
            .ok_or_else(|| ProviderError::Parse("Ollama response has no message".to_string()))?;

        let usage = match (parsed.prompt_eval_count, parsed.eval_count) {
            (None, None) => None,
            (p, c) => {
                let (p, c) = (p.unwrap_or(0), c.unwrap_or(0));
                Some(LlmUsage {
                    prompt_tokens: p,
                    completion_tokens: c,
                    total_tokens: p.saturating_add(c),
                })
            }
        };
        Ok(LlmResponse {
            content: message.content,
            usage,
        })
    }
}

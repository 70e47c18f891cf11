//! Google Gemini client implementing `LlmClient` (ChatGemini).
//!
//! Calls the `models/{model}:generateContent` REST endpoint with reqwest. System messages
//! are sent as `systemInstruction`; assistant turns use role `model`, everything else `user`.
//! Requires `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) unless a key is passed explicitly.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ProviderError};
use crate::message::Message;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini chat client.
///
/// **Interaction**: Implements `LlmClient`; built by `build_llm` for `LlmProvider::Gemini`.
pub struct ChatGemini {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: Option<f32>,
}

impl ChatGemini {
    /// Build client with an explicit API key and the default base URL.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            model: model.into(),
            temperature: None,
        }
    }

    /// Build client reading the key from `GEMINI_API_KEY`, then `GOOGLE_API_KEY`.
    pub fn from_env(model: impl Into<String>) -> Result<Self, ProviderError> {
        let key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("GOOGLE_API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                ProviderError::MissingCredentials(
                    "GEMINI_API_KEY or GOOGLE_API_KEY is not set".to_string(),
                )
            })?;
        Ok(Self::new(key, model))
    }

    /// Override the API base URL (e.g. a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    fn request_body(&self, messages: &[Message]) -> Value {
        let mut system = Vec::new();
        let mut contents = Vec::new();
        for m in messages {
            match m {
                Message::System(s) => system.push(s.as_str()),
                Message::User(s) => contents.push(json!({
                    "role": "user",
                    "parts": [{ "text": s }]
                })),
                Message::Assistant(s) => contents.push(json!({
                    "role": "model",
                    "parts": [{ "text": s }]
                })),
            }
        }

        let mut body = json!({ "contents": contents });
        if !system.is_empty() {
            body["systemInstruction"] = json!({ "parts": [{ "text": system.join("\n\n") }] });
        }
        if let Some(t) = self.temperature {
            body["generationConfig"] = json!({ "temperature": t });
        }
        body
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

fn parse_response(resp: GenerateContentResponse) -> Result<LlmResponse, ProviderError> {
    let candidate = resp
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::Parse("Gemini returned no candidates".to_string()))?;
    let content: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    let usage = resp.usage_metadata.map(|u| {
        let prompt = u.prompt_token_count.unwrap_or(0);
        let completion = u.candidates_token_count.unwrap_or(0);
        LlmUsage {
            prompt_tokens: prompt,
            completion_tokens: completion,
            total_tokens: u
                .total_token_count
                .unwrap_or(prompt.saturating_add(completion)),
        }
    });
    Ok(LlmResponse { content, usage })
}

#[async_trait]
impl LlmClient for ChatGemini {
    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let body = self.request_body(messages);
        let trace_id = uuid::Uuid::new_v4().to_string();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            "Gemini generateContent"
        );
        trace!(trace_id = %trace_id, request = %body, "Gemini request body");

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.api_key.as_str())
            .json(&body)
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
        trace!(trace_id = %trace_id, response = %text, "Gemini response body");
        let parsed: GenerateContentResponse =
            serde_json::from_str(&text).map_err(|e| ProviderError::Parse(e.to_string()))?;
        Ok(parse_response(parsed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_maps_roles_and_system_instruction() {
        let llm = ChatGemini::new("k", "m").with_temperature(0.5);
        let body = llm.request_body(&[
            Message::system("be brief"),
            Message::user("topic"),
            Message::assistant("draft"),
        ]);
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "be brief");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["text"], "draft");
        assert_eq!(body["contents"].as_array().unwrap().len(), 2);
        assert!(body["generationConfig"]["temperature"].is_number());
    }

    #[test]
    fn parse_response_joins_parts_and_reads_usage() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Par" }, { "text": "is" }] } }],
            "usageMetadata": { "promptTokenCount": 4, "candidatesTokenCount": 1, "totalTokenCount": 5 }
        }))
        .unwrap();
        let out = parse_response(resp).unwrap();
        assert_eq!(out.content, "Paris");
        assert_eq!(out.usage.unwrap().total_tokens, 5);
    }

    #[test]
    fn missing_total_is_saturating_sum_of_parts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "x" }] } }],
            "usageMetadata": { "promptTokenCount": u32::MAX, "candidatesTokenCount": 3 }
        }))
        .unwrap();
        let usage = parse_response(resp).unwrap().usage.unwrap();
        assert_eq!(usage.completion_tokens, 3);
        assert_eq!(usage.total_tokens, u32::MAX);
    }

    #[test]
    fn parse_response_without_candidates_is_parse_error() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(matches!(parse_response(resp), Err(ProviderError::Parse(_))));
    }
}

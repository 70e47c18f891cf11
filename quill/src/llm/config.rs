//! Provider selection and client construction.
//!
//! [`LlmConfig`] is an explicit value (usually from env via [`LlmConfig::from_env`], then
//! overridden by CLI flags); [`build_llm`] turns it into a shared `LlmClient`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_openai::config::OpenAIConfig;

use super::gemini::{ChatGemini, DEFAULT_GEMINI_MODEL};
use super::ollama::{ChatOllama, DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};
use super::openai::{ChatOpenAI, DEFAULT_OPENAI_MODEL};
use super::{LlmClient, MockLlm, ProviderError};

/// Which chat-model backend to use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LlmProvider {
    #[default]
    Gemini,
    Ollama,
    OpenAI,
    /// Offline stub; replies are `"mock reply {n}"`.
    Mock,
}

impl LlmProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => "gemini",
            LlmProvider::Ollama => "ollama",
            LlmProvider::OpenAI => "openai",
            LlmProvider::Mock => "mock",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmProvider::Gemini => DEFAULT_GEMINI_MODEL,
            LlmProvider::Ollama => DEFAULT_OLLAMA_MODEL,
            LlmProvider::OpenAI => DEFAULT_OPENAI_MODEL,
            LlmProvider::Mock => "mock",
        }
    }
}

impl fmt::Display for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LlmProvider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" | "google" => Ok(LlmProvider::Gemini),
            "ollama" => Ok(LlmProvider::Ollama),
            "openai" => Ok(LlmProvider::OpenAI),
            "mock" => Ok(LlmProvider::Mock),
            other => Err(ProviderError::UnknownProvider(other.to_string())),
        }
    }
}

/// Settings for one chat-model client.
///
/// `None` fields fall back to provider defaults at build time: default model per provider,
/// API key from the provider's own env var, base URL from `OLLAMA_BASE_URL` /
/// `OPENAI_BASE_URL` or the public endpoint.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LlmConfig {
    pub provider: LlmProvider,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
}

impl LlmConfig {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            ..Default::default()
        }
    }

    /// Builds config from environment variables.
    ///
    /// Reads: `LLM_PROVIDER` (default `gemini`), `LLM_MODEL`, `LLM_API_KEY`, `LLM_BASE_URL`,
    /// `LLM_TEMPERATURE`. Fails when `LLM_PROVIDER` names an unknown provider or
    /// `LLM_TEMPERATURE` is not a number.
    pub fn from_env() -> Result<Self, ProviderError> {
        let provider = match non_empty_env("LLM_PROVIDER") {
            Some(s) => s.parse()?,
            None => LlmProvider::default(),
        };
        let temperature = match non_empty_env("LLM_TEMPERATURE") {
            None => None,
            Some(value) => Some(value.trim().parse().map_err(|_| {
                ProviderError::InvalidSetting {
                    key: "LLM_TEMPERATURE",
                    value,
                }
            })?),
        };
        Ok(Self {
            provider,
            model: non_empty_env("LLM_MODEL"),
            api_key: non_empty_env("LLM_API_KEY"),
            base_url: non_empty_env("LLM_BASE_URL"),
            temperature,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Model that will be requested: explicit model or the provider default.
    pub fn resolved_model(&self) -> String {
        self.model
            .clone()
            .unwrap_or_else(|| self.provider.default_model().to_string())
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

/// Builds the client described by `config`.
///
/// Returns `MissingCredentials` for Gemini/OpenAI when no key is configured or found in env.
pub fn build_llm(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, ProviderError> {
    let model = config.resolved_model();
    let llm: Arc<dyn LlmClient> = match config.provider {
        LlmProvider::Gemini => {
            let mut llm = match &config.api_key {
                Some(key) => ChatGemini::new(key.clone(), model),
                None => ChatGemini::from_env(model)?,
            };
            if let Some(url) = &config.base_url {
                llm = llm.with_base_url(url.clone());
            }
            if let Some(t) = config.temperature {
                llm = llm.with_temperature(t);
            }
            Arc::new(llm)
        }
        LlmProvider::Ollama => {
            let base = config
                .base_url
                .clone()
                .or_else(|| non_empty_env("OLLAMA_BASE_URL"))
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.to_string());
            let mut llm = ChatOllama::new(model).with_base_url(base);
            if let Some(t) = config.temperature {
                llm = llm.with_temperature(t);
            }
            Arc::new(llm)
        }
        LlmProvider::OpenAI => {
            let key = config
                .api_key
                .clone()
                .or_else(|| non_empty_env("OPENAI_API_KEY"))
                .ok_or_else(|| {
                    ProviderError::MissingCredentials("OPENAI_API_KEY is not set".to_string())
                })?;
            let mut openai_config = OpenAIConfig::new().with_api_key(key);
            if let Some(base) = config
                .base_url
                .clone()
                .or_else(|| non_empty_env("OPENAI_BASE_URL"))
            {
                openai_config = openai_config.with_api_base(base);
            }
            let mut llm = ChatOpenAI::with_config(openai_config, model);
            if let Some(t) = config.temperature {
                llm = llm.with_temperature(t);
            }
            Arc::new(llm)
        }
        LlmProvider::Mock => Arc::new(MockLlm::counted("mock reply")),
    };
    Ok(llm)
}

//! Configuration for building a reflection runner.
//!
//! Used by [`build_reflection_runner`](super::build_reflection_runner). The CLI fills this
//! from env via [`ReflectionBuildConfig::from_env`] and then applies its own flags.

use std::path::PathBuf;

use crate::llm::{LlmConfig, ProviderError};
use crate::prompts::{ENV_GENERATION_PROMPT, ENV_REFLECTION_PROMPT};

use super::build::BuildRunnerError;
use super::termination::DEFAULT_MAX_MESSAGES;

/// Everything needed to build a [`ReflectionRunner`](super::ReflectionRunner).
#[derive(Clone, Debug)]
pub struct ReflectionBuildConfig {
    /// Model used by the generate node (and the reflect node unless `reflection_llm` is set).
    pub llm: LlmConfig,
    /// Separate model for the reflect node. `None` shares `llm`'s client.
    pub reflection_llm: Option<LlmConfig>,
    /// Message-count threshold; the run ends after a Generate once `len > max_messages`.
    pub max_messages: i64,
    /// Upper bound on node steps. `None` means unbounded.
    pub recursion_limit: Option<usize>,
    /// Directory holding `reflection.yaml`. `None` uses `PROMPTS_DIR` or the embedded defaults.
    pub prompts_dir: Option<PathBuf>,
    /// Overrides the generation system prompt.
    pub generation_prompt: Option<String>,
    /// Overrides the reflection system prompt.
    pub reflection_prompt: Option<String>,
}

impl Default for ReflectionBuildConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            reflection_llm: None,
            max_messages: DEFAULT_MAX_MESSAGES,
            recursion_limit: None,
            prompts_dir: None,
            generation_prompt: None,
            reflection_prompt: None,
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|s| !s.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, BuildRunnerError> {
    match env_var(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| BuildRunnerError::InvalidSetting { key, value }),
    }
}

impl ReflectionBuildConfig {
    /// Builds config from environment variables. No variable is required.
    ///
    /// Reads the `LLM_*` variables (see [`LlmConfig::from_env`]), `REFLECTION_MAX_MESSAGES`,
    /// `REFLECTION_RECURSION_LIMIT`, `PROMPTS_DIR`, `GENERATION_SYSTEM_PROMPT` and
    /// `REFLECTION_SYSTEM_PROMPT`. Use after `config::load_and_apply` so `.env` and XDG
    /// values are visible. A present but unparsable number is an error.
    pub fn from_env() -> Result<Self, BuildRunnerError> {
        Ok(Self {
            llm: LlmConfig::from_env().map_err(|e| match e {
                ProviderError::InvalidSetting { key, value } => {
                    BuildRunnerError::InvalidSetting { key, value }
                }
                other => other.into(),
            })?,
            reflection_llm: None,
            max_messages: parse_env("REFLECTION_MAX_MESSAGES")?.unwrap_or(DEFAULT_MAX_MESSAGES),
            recursion_limit: parse_env("REFLECTION_RECURSION_LIMIT")?,
            prompts_dir: env_var("PROMPTS_DIR").map(PathBuf::from),
            generation_prompt: env_var(ENV_GENERATION_PROMPT),
            reflection_prompt: env_var(ENV_REFLECTION_PROMPT),
        })
    }
}

//! Run orchestration for the reflection loop.
//!
//! Builds [`ReflectionBuildConfig`] from env via [`ReflectionBuildConfig::from_env`], applies the
//! CLI flags on top, then runs the loop with an optional stderr progress display.

mod display;
mod reflection;

pub use display::{format_transcript, transcript_json};
pub use reflection::run_reflection;

use quill::{BuildRunnerError, LlmProvider, ReflectionBuildConfig};
use thiserror::Error;

/// Topic used when neither `-m` nor positional words are given.
pub const DEFAULT_TOPIC: &str = "AI Agents taking over content creation";

/// Options for one `quill run`.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Seed topic for the first generation.
    pub topic: String,
    /// Overrides `LLM_PROVIDER`.
    pub provider: Option<LlmProvider>,
    /// Overrides `LLM_MODEL`.
    pub model: Option<String>,
    /// Overrides `REFLECTION_MAX_MESSAGES`.
    pub max_messages: Option<i64>,
    /// Overrides `REFLECTION_RECURSION_LIMIT`.
    pub recursion_limit: Option<usize>,
    /// Print node enter/exit to stderr while running.
    pub verbose: bool,
    /// Max chars per message in the verbose display.
    pub display_max_len: usize,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("build runner: {0}")]
    Build(#[from] BuildRunnerError),
    #[error("run: {0}")]
    Run(#[from] quill::RunError),
    #[error("run task: {0}")]
    Join(String),
}

/// Env config with the CLI flags applied. A provider flag resets the model to that provider's
/// default unless `--model` is also given.
pub fn build_config(opts: &RunOptions) -> Result<ReflectionBuildConfig, RunError> {
    let mut config = ReflectionBuildConfig::from_env()?;
    if let Some(provider) = opts.provider {
        if provider != config.llm.provider {
            config.llm.provider = provider;
            config.llm.model = None;
        }
    }
    if let Some(model) = &opts.model {
        config.llm.model = Some(model.clone());
    }
    if let Some(max) = opts.max_messages {
        config.max_messages = max;
    }
    if let Some(limit) = opts.recursion_limit {
        config.recursion_limit = Some(limit);
    }
    Ok(config)
}

//! Builds a [`ReflectionRunner`] from [`ReflectionBuildConfig`].

use std::sync::Arc;

use crate::llm::{build_llm, LlmClient, ProviderError};
use crate::prompts::{self, LoadError, ReflectionPrompts};

use super::config::ReflectionBuildConfig;
use super::runner::ReflectionRunner;
use super::termination::MessageCountPolicy;

/// Error when building a runner from config (bad provider, missing key, prompts, env values).
#[derive(Debug, thiserror::Error)]
pub enum BuildRunnerError {
    #[error("{0}")]
    Provider(#[from] ProviderError),
    #[error("{0}")]
    Prompts(#[from] LoadError),
    #[error("invalid value for {key}: {value:?}")]
    InvalidSetting { key: &'static str, value: String },
}

/// Resolves prompts: directory (explicit dir must exist) or embedded defaults, then config overrides.
pub fn resolve_prompts(config: &ReflectionBuildConfig) -> Result<ReflectionPrompts, LoadError> {
    let mut resolved = match &config.prompts_dir {
        Some(dir) => prompts::load(Some(dir.as_path()))?,
        None => prompts::load_or_default(None),
    };
    if let Some(s) = &config.generation_prompt {
        resolved.generation = s.clone();
    }
    if let Some(s) = &config.reflection_prompt {
        resolved.reflection = s.clone();
    }
    Ok(resolved)
}

/// Builds the clients, prompts and policy described by `config`.
pub fn build_reflection_runner(
    config: &ReflectionBuildConfig,
) -> Result<ReflectionRunner, BuildRunnerError> {
    let generate_llm = build_llm(&config.llm)?;
    let reflect_llm: Arc<dyn LlmClient> = match &config.reflection_llm {
        Some(c) => build_llm(c)?,
        None => Arc::clone(&generate_llm),
    };
    let prompts = resolve_prompts(config)?;

    tracing::debug!(
        provider = generate_llm.provider(),
        model = generate_llm.model(),
        reflect_provider = reflect_llm.provider(),
        max_messages = config.max_messages,
        recursion_limit = ?config.recursion_limit,
        "building reflection runner"
    );

    let mut runner = ReflectionRunner::from_llms(generate_llm, reflect_llm, &prompts)
        .with_policy(MessageCountPolicy::new(config.max_messages));
    if let Some(limit) = config.recursion_limit {
        runner = runner.with_recursion_limit(limit);
    }
    Ok(runner)
}

//! `quill check`: ask one question to each configured provider and report the answers.

use std::time::{Duration, Instant};

use quill::{build_llm, LlmConfig, LlmProvider, Message};

pub const DEFAULT_CHECK_QUESTION: &str = "What is the capital of France?";

/// Outcome for one provider. Build and call failures are kept as text so one bad provider
/// does not hide the others.
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub provider: LlmProvider,
    pub model: String,
    pub answer: Result<String, String>,
    pub elapsed: Duration,
}

impl CheckResult {
    pub fn is_ok(&self) -> bool {
        self.answer.is_ok()
    }
}

async fn check_one(config: LlmConfig, question: &str) -> CheckResult {
    let start = Instant::now();
    let model = config.resolved_model();
    let answer = match build_llm(&config) {
        Ok(llm) => llm
            .invoke(&[Message::user(question)])
            .await
            .map(|r| r.content)
            .map_err(|e| e.to_string()),
        Err(e) => Err(e.to_string()),
    };
    tracing::info!(provider = %config.provider, model = %model, ok = answer.is_ok(), "llm check");
    CheckResult {
        provider: config.provider,
        model,
        answer,
        elapsed: start.elapsed(),
    }
}

/// Asks `question` to each provider in order. `model` applies to every provider when set.
pub async fn check_providers(
    providers: &[LlmProvider],
    model: Option<&str>,
    question: &str,
) -> Vec<CheckResult> {
    let mut results = Vec::with_capacity(providers.len());
    for provider in providers {
        let mut config = LlmConfig::new(*provider);
        if let Some(m) = model {
            config = config.with_model(m);
        }
        results.push(check_one(config, question).await);
    }
    results
}

/// `Gemini Response (gemini-2.5-flash, 812 ms):` followed by the answer or the error.
pub fn format_check_result(result: &CheckResult) -> String {
    let name = result.provider.as_str();
    let mut title: Vec<char> = name.chars().collect();
    if let Some(c) = title.first_mut() {
        *c = c.to_ascii_uppercase();
    }
    let title: String = title.into_iter().collect();
    let body = match &result.answer {
        Ok(text) => text.trim().to_string(),
        Err(e) => format!("error: {}", e),
    };
    format!(
        "{} Response ({}, {} ms):\n{}",
        title,
        result.model,
        result.elapsed.as_millis(),
        body
    )
}

//! Mock LLM for tests and examples.
//!
//! Returns a fixed reply, a scripted sequence of replies (cycling), a reply that
//! embeds a call counter, or a fixed provider error. Counts calls either way.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage, ProviderError};
use crate::message::Message;

enum Reply {
    Fixed(String),
    Script(Vec<String>),
    Counted(String),
    Fail { status: u16, body: String },
}

/// Mock LLM: deterministic replies with no network.
///
/// Used by the reflection runner tests and the `reflection` example so the whole loop
/// can run without a provider.
///
/// **Interaction**: Implements `LlmClient`; used by `GenerateNode` and `ReflectNode`.
pub struct MockLlm {
    reply: Reply,
    usage: Option<LlmUsage>,
    calls: AtomicUsize,
}

impl MockLlm {
    /// Creates a mock that always returns `content`.
    pub fn fixed(content: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fixed(content.into()))
    }

    /// Creates a mock that returns `replies` in order, starting over after the last one.
    ///
    /// An empty script behaves like `fixed("")`.
    pub fn scripted<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_reply(Reply::Script(replies.into_iter().map(Into::into).collect()))
    }

    /// Creates a mock whose reply is `"{prefix} {n}"`, `n` being the 1-based call number.
    pub fn counted(prefix: impl Into<String>) -> Self {
        Self::with_reply(Reply::Counted(prefix.into()))
    }

    /// Creates a mock that fails every call with `ProviderError::Api { status, body }`.
    pub fn failing(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Fail {
            status,
            body: body.into(),
        })
    }

    /// Attach fixed usage to every successful reply (builder).
    pub fn with_usage(mut self, usage: LlmUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Number of `invoke` calls so far, including failed ones.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            usage: None,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    fn provider(&self) -> &str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn invoke(&self, _messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        let content = match &self.reply {
            Reply::Fixed(s) => s.clone(),
            Reply::Script(items) if items.is_empty() => String::new(),
            Reply::Script(items) => items[n % items.len()].clone(),
            Reply::Counted(prefix) => format!("{} {}", prefix, n + 1),
            Reply::Fail { status, body } => {
                return Err(ProviderError::Api {
                    status: *status,
                    body: body.clone(),
                }
                .into())
            }
        };
        Ok(LlmResponse {
            content,
            usage: self.usage.clone(),
        })
    }
}

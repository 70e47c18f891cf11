//! # Quill
//!
//! A bounded **generate/reflect** loop for LLM-written content. One node drafts a piece of
//! content, a second node critiques it, the critique goes back to the first node as a new
//! instruction, and the run stops once the transcript grows past a threshold.
//!
//! ## Design principles
//!
//! - **Single state type**: [`ReflectionState`] is an append-only transcript that every node
//!   reads and extends by exactly one message.
//! - **Explicit control flow**: the cycle is a small state machine ([`Step`]) in
//!   [`ReflectionRunner`], with the stop condition behind [`TerminationPolicy`].
//! - **Injected capabilities**: nodes talk to an [`LlmClient`]; providers are built from an
//!   explicit [`LlmConfig`], never from globals.
//!
//! ## Main modules
//!
//! - [`agent`]: [`agent::reflection`] — [`GenerateNode`], [`ReflectNode`], [`ReflectionRunner`],
//!   [`ReflectionBuildConfig`], [`build_reflection_runner`].
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatGemini`], [`ChatOllama`], [`ChatOpenAI`].
//! - [`graph`]: [`Node`] trait, [`GraphTopology`], logging helpers, [`generate_mermaid`],
//!   [`generate_dot`], [`generate_text`].
//! - [`prompts`]: default and file-based system prompts.
//! - [`stream`]: [`StreamMode`], [`StreamEvent`], [`StreamWriter`].
//! - [`state`] / [`message`]: [`ReflectionState`], [`Message`], [`Role`].
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use quill::{MockLlm, ReflectionPrompts, ReflectionRunner};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let runner = ReflectionRunner::from_llms(
//!     Arc::new(MockLlm::counted("draft")),
//!     Arc::new(MockLlm::counted("critique")),
//!     &ReflectionPrompts::default(),
//! );
//! let messages = runner.run("AI agents taking over content creation").await.unwrap();
//! assert_eq!(messages.len(), 6);
//! # }
//! ```
//!
//! ## Examples
//!
//! See the `quill-examples` crate: `reflection`, `llm_check`.

pub mod agent;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod prompts;
pub mod state;
pub mod stream;

pub use agent::reflection::{
    build_reflection_runner, BuildRunnerError, GenerateNode, MessageCountPolicy, ReflectNode,
    ReflectionBuildConfig, ReflectionRunner, RunError, Step, TerminationPolicy,
    DEFAULT_MAX_MESSAGES,
};
pub use error::AgentError;
pub use graph::{
    generate_dot, generate_mermaid, generate_text, Edge, GraphTopology, Node, END, START,
};
pub use llm::{
    build_llm, ChatGemini, ChatOllama, ChatOpenAI, LlmClient, LlmConfig, LlmProvider,
    LlmResponse, LlmUsage, MockLlm, ProviderError,
};
pub use message::{Message, Role};
pub use prompts::ReflectionPrompts;
pub use state::ReflectionState;
pub use stream::{StreamEvent, StreamMode, StreamWriter};

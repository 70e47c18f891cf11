//! Reflection: generate/critique loop with a bounded stop condition.
//!
//! The loop alternates two nodes over one append-only transcript:
//!
//! - **[`GenerateNode`]**: drafts (or revises) content; appends a generator message.
//! - **[`ReflectNode`]**: critiques the latest draft; appends it as a human message.
//! - **[`ReflectionRunner`]**: the `Start → Generate → (Reflect → Generate)* → End` state
//!   machine; a [`TerminationPolicy`] is checked after every Generate.
//! - **[`ReflectionBuildConfig`]** / [`build_reflection_runner`]: config-driven construction
//!   for CLIs.
//!
//! With the default policy (`len > 4`) a run makes three Generate and two Reflect calls and
//! returns six messages.

mod build;
mod config;
mod error;
mod generate_node;
mod reflect_node;
mod runner;
mod termination;

pub use build::{build_reflection_runner, resolve_prompts, BuildRunnerError};
pub use config::ReflectionBuildConfig;
pub use error::RunError;
pub use generate_node::{GenerateNode, GENERATE};
pub use reflect_node::{ReflectNode, REFLECT};
pub use runner::{ReflectionRunner, Step};
pub use termination::{MessageCountPolicy, TerminationPolicy, DEFAULT_MAX_MESSAGES};

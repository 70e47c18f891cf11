//! Error type for the reflection runner.

use crate::error::AgentError;

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("seed topic is empty")]
    EmptySeed,
    #[error("recursion limit of {limit} steps reached without ending")]
    RecursionLimit { limit: usize },
    #[error("execution failed: {0}")]
    Execution(#[from] AgentError),
}

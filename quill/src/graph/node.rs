//! Graph node trait: one step of an agent loop.
//!
//! Receives state `S`, returns the updated `S`. Routing is not the node's concern; the
//! agent's control flow decides what runs next.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::error::AgentError;

/// One step in a loop: state in, state out.
///
/// **Interaction**: Implemented by `GenerateNode` and `ReflectNode`; driven by
/// `ReflectionRunner`, which owns the transition table.
#[async_trait]
pub trait Node<S>: Send + Sync
where
    S: Clone + Send + Sync + Debug + 'static,
{
    /// Node id (e.g. `"generate"`, `"reflect"`). Must be unique within a loop.
    fn id(&self) -> &str;

    /// One step. On error the input state is dropped and the error propagates unchanged.
    async fn run(&self, state: S) -> Result<S, AgentError>;
}

//! Logging utilities for loop execution.
//!
//! Structured `tracing` events for run start/end and per-node execution, so every agent
//! loop logs the same field names.

use std::fmt::Debug;

/// Log node execution start.
pub fn log_node_start(node_id: &str, step: usize) {
    tracing::debug!(node_id = node_id, step = step, "Starting node execution");
}

/// Log the input state of a node.
///
/// Emitted at trace level; states carry whole transcripts.
pub fn log_node_state<S: Debug>(node_id: &str, state: &S) {
    tracing::trace!(node_id = node_id, state = ?state, "Node execution: state");
}

/// Log node execution completion and where control goes next.
pub fn log_node_complete(node_id: &str, message_count: usize, next: &str) {
    tracing::debug!(
        node_id = node_id,
        message_count = message_count,
        next = next,
        "Node execution complete"
    );
}

/// Log loop execution start.
pub fn log_graph_start(graph: &str) {
    tracing::info!(graph = graph, "Starting graph execution");
}

/// Log loop execution completion.
pub fn log_graph_complete(graph: &str, steps: usize, message_count: usize) {
    tracing::info!(
        graph = graph,
        steps = steps,
        message_count = message_count,
        "Graph execution complete"
    );
}

/// Log loop execution error.
pub fn log_graph_error<E: Debug>(graph: &str, error: &E) {
    tracing::error!(graph = graph, ?error, "Graph execution error");
}

//! Graph vocabulary shared by the reflection loop: node trait, topology, logging, rendering.
//!
//! There is no general graph engine here. Agents drive their own control flow (see
//! `agent::reflection`) and describe it with a [`GraphTopology`] for visualization.

mod logging;
mod node;
mod topology;
mod visualization;

pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_node_state,
};
pub use node::Node;
pub use topology::{Edge, GraphTopology};
pub use visualization::{generate_dot, generate_mermaid, generate_text};

/// Virtual entry node id.
pub const START: &str = "__start__";

/// Virtual exit node id.
pub const END: &str = "__end__";

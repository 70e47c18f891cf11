//! Static description of a loop's nodes and edges.

use serde::Serialize;

use super::{END, START};

/// One directed edge. Conditional edges carry the label of the branch they represent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub conditional: bool,
    pub label: Option<String>,
}

/// Nodes (excluding `START`/`END`) and edges of a loop, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct GraphTopology {
    pub nodes: Vec<String>,
    pub edges: Vec<Edge>,
}

impl GraphTopology {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node id; `START` and `END` are implicit and ignored.
    pub fn node(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if id != START && id != END && !self.nodes.contains(&id) {
            self.nodes.push(id);
        }
        self
    }

    pub fn edge(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            conditional: false,
            label: None,
        });
        self
    }

    pub fn conditional_edge(
        mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        self.edges.push(Edge {
            from: from.into(),
            to: to.into(),
            conditional: true,
            label: Some(label.into()),
        });
        self
    }

    /// Edges leaving `id`.
    pub fn successors(&self, id: &str) -> Vec<&Edge> {
        self.edges.iter().filter(|e| e.from == id).collect()
    }
}

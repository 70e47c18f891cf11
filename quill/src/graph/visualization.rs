//! Graph visualization utilities.
//!
//! Renders a [`GraphTopology`] as Mermaid flowchart, Graphviz DOT, or plain text for
//! documentation and debugging. Conditional edges are drawn dashed and labelled.

use super::{GraphTopology, END, START};

fn display_name(id: &str) -> &str {
    match id {
        START => "START",
        END => "END",
        other => other,
    }
}

/// Generate a Mermaid `flowchart` representation of the graph.
pub fn generate_mermaid(graph: &GraphTopology) -> String {
    let mut out = String::from("flowchart TD\n");
    out.push_str(&format!("  {}([START]):::first\n", START));
    for id in &graph.nodes {
        out.push_str(&format!("  {}({})\n", id, id));
    }
    out.push_str(&format!("  {}([END]):::last\n", END));

    for e in &graph.edges {
        match (&e.label, e.conditional) {
            (Some(label), true) => {
                out.push_str(&format!("  {} -. {} .-> {}\n", e.from, label, e.to))
            }
            (None, true) => out.push_str(&format!("  {} -.-> {}\n", e.from, e.to)),
            (_, false) => out.push_str(&format!("  {} --> {}\n", e.from, e.to)),
        }
    }

    out.push_str("  classDef first fill-opacity:0\n");
    out.push_str("  classDef last fill:#bfb6fc\n");
    out
}

/// Generate Graphviz DOT format representation of the graph.
///
/// Returns a string in DOT format that can be rendered using Graphviz tools.
pub fn generate_dot(graph: &GraphTopology) -> String {
    let mut dot = String::from("digraph {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=box];\n\n");

    dot.push_str(&format!(
        "  \"{}\" [label=\"START\", style=bold, fillcolor=lightgreen];\n",
        START
    ));
    dot.push_str(&format!(
        "  \"{}\" [label=\"END\", style=bold, fillcolor=lightcoral];\n",
        END
    ));
    for node_id in &graph.nodes {
        dot.push_str(&format!("  \"{}\";\n", node_id));
    }

    dot.push('\n');

    for e in &graph.edges {
        let mut attrs = Vec::new();
        if e.conditional {
            attrs.push("style=dashed".to_string());
        }
        if let Some(label) = &e.label {
            attrs.push(format!("label=\"{}\"", label));
        }
        if attrs.is_empty() {
            dot.push_str(&format!("  \"{}\" -> \"{}\";\n", e.from, e.to));
        } else {
            dot.push_str(&format!(
                "  \"{}\" -> \"{}\" [{}];\n",
                e.from,
                e.to,
                attrs.join(", ")
            ));
        }
    }

    dot.push_str("}\n");
    dot
}

/// Generate a simple text representation of the graph structure.
pub fn generate_text(graph: &GraphTopology) -> String {
    let mut text = String::from("Graph Structure:\n");
    text.push_str(&format!("Nodes: {}\n", graph.nodes.len()));
    text.push_str("\nEdges:\n");
    for e in &graph.edges {
        let arrow = if e.conditional { "-?->" } else { "--->" };
        match &e.label {
            Some(label) => text.push_str(&format!(
                "  {} {} {}  [{}]\n",
                display_name(&e.from),
                arrow,
                display_name(&e.to),
                label
            )),
            None => text.push_str(&format!(
                "  {} {} {}\n",
                display_name(&e.from),
                arrow,
                display_name(&e.to)
            )),
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GraphTopology {
        GraphTopology::new()
            .node("node1")
            .node("node2")
            .edge(START, "node1")
            .conditional_edge("node1", "node2", "more")
            .conditional_edge("node1", END, "done")
            .edge("node2", "node1")
    }

    #[test]
    fn test_generate_dot() {
        let dot = generate_dot(&sample());

        assert!(dot.contains("digraph"));
        assert!(dot.contains("START"));
        assert!(dot.contains("END"));
        assert!(dot.contains("\"node1\" -> \"node2\" [style=dashed, label=\"more\"]"));
        assert!(dot.contains("\"node2\" -> \"node1\";"));
    }

    #[test]
    fn test_generate_mermaid() {
        let m = generate_mermaid(&sample());

        assert!(m.starts_with("flowchart TD"));
        assert!(m.contains("__start__ --> node1"));
        assert!(m.contains("node1 -. done .-> __end__"));
        assert!(m.contains("node2 --> node1"));
    }

    #[test]
    fn test_generate_text() {
        let text = generate_text(&sample());

        assert!(text.contains("Graph Structure"));
        assert!(text.contains("Nodes: 2"));
        assert!(text.contains("START ---> node1"));
        assert!(text.contains("node1 -?-> END  [done]"));
    }
}

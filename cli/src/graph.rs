//! `quill graph`: render the loop topology.

use quill::{
    build_reflection_runner, generate_dot, generate_mermaid, generate_text, LlmConfig, LlmProvider,
};

use crate::run::{build_config, RunError, RunOptions};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum GraphFormat {
    #[default]
    Mermaid,
    Dot,
    Text,
}

/// Renders the topology of the runner `opts` would build. The edge label on the end
/// condition reflects the configured threshold; no model is contacted.
pub fn render_graph(opts: &RunOptions, format: GraphFormat) -> Result<String, RunError> {
    let mut config = build_config(opts)?;
    config.llm = LlmConfig::new(LlmProvider::Mock);
    config.reflection_llm = None;
    let topology = build_reflection_runner(&config)?.topology();
    Ok(match format {
        GraphFormat::Mermaid => generate_mermaid(&topology),
        GraphFormat::Dot => generate_dot(&topology),
        GraphFormat::Text => generate_text(&topology),
    })
}

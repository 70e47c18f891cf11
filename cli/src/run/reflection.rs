//! Runs the reflection loop, printing progress to stderr when verbose.

use std::collections::HashSet;

use quill::{build_reflection_runner, ReflectionState, StreamEvent, StreamMode};
use tokio_stream::StreamExt;

use super::display::format_message_truncated;
use super::{build_config, RunError, RunOptions};

/// Single line when a node is entered.
fn log_node_enter(node_id: &str) {
    eprintln!("Entering: {}", node_id);
}

fn on_event(event: &StreamEvent<ReflectionState>, display_max_len: usize) {
    match event {
        StreamEvent::TaskStart { node_id } => log_node_enter(node_id),
        StreamEvent::TaskEnd {
            node_id,
            result: Err(e),
        } => eprintln!("  {} failed: {}", node_id, e),
        StreamEvent::Updates { state, .. } => {
            if let Some(last) = state.last() {
                eprintln!("  {}", format_message_truncated(last, display_max_len));
            }
        }
        StreamEvent::TaskEnd { .. } | StreamEvent::Values(_) => {}
    }
}

/// Builds the runner from env plus `opts` and runs the loop on `opts.topic`.
pub async fn run_reflection(opts: &RunOptions) -> Result<ReflectionState, RunError> {
    let config = build_config(opts)?;
    let runner = build_reflection_runner(&config)?;
    tracing::info!(
        provider = %config.llm.provider,
        model = %config.llm.resolved_model(),
        max_messages = config.max_messages,
        "quill run"
    );

    if !opts.verbose {
        return Ok(runner.invoke(&opts.topic).await?);
    }

    let modes = HashSet::from([StreamMode::Tasks, StreamMode::Updates]);
    let (mut events, handle) = runner.stream(opts.topic.clone(), modes);
    while let Some(event) = events.next().await {
        on_event(&event, opts.display_max_len);
    }
    let state = handle.await.map_err(|e| RunError::Join(e.to_string()))??;
    eprintln!("Done: {} messages", state.len());
    Ok(state)
}

//! Example: streaming task events with a custom termination policy.
//!
//! The loop ends after the third draft instead of the default `len > 4`.
//!
//! Run: `cargo run -p quill-examples --example reflection_stream`

use std::collections::HashSet;
use std::sync::Arc;

use quill::{MockLlm, ReflectionPrompts, ReflectionRunner, ReflectionState, StreamEvent, StreamMode};
use tokio_stream::StreamExt;

#[tokio::main]
async fn main() {
    let llm = Arc::new(MockLlm::counted("reply"));
    let runner = ReflectionRunner::from_llms(llm.clone(), llm, &ReflectionPrompts::default())
        .with_policy(|s: &ReflectionState| s.generation_count() >= 3)
        .with_recursion_limit(10);

    let modes = HashSet::from([StreamMode::Tasks]);
    let (mut events, handle) = runner.stream("edge AI", modes);
    while let Some(event) = events.next().await {
        match event {
            StreamEvent::TaskStart { node_id } => println!("-> {}", node_id),
            StreamEvent::TaskEnd { node_id, result } => println!("<- {} {:?}", node_id, result),
            _ => {}
        }
    }

    match handle.await {
        Ok(Ok(state)) => println!("final draft: {:?}", state.last_generation()),
        Ok(Err(e)) => eprintln!("run error: {}", e),
        Err(e) => eprintln!("task error: {}", e),
    }
}

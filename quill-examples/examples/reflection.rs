//! Example: the generate/reflect loop over scripted mock models.
//!
//! Prints the loop as Mermaid, then the transcript. No network access needed.
//!
//! Run: `cargo run -p quill-examples --example reflection -- "Rust in 2026"`

use std::env;
use std::sync::Arc;

use quill::{generate_mermaid, MockLlm, ReflectionPrompts, ReflectionRunner};

#[tokio::main]
async fn main() {
    let topic = env::args()
        .nth(1)
        .unwrap_or_else(|| "AI Agents taking over content creation".to_string());

    let writer = Arc::new(MockLlm::scripted(vec![
        "Draft 1: Agents are writing posts now. #AI".to_string(),
        "Draft 2: Your next favourite creator might be an agent 🤖 #AI #agents #creators".to_string(),
        "Draft 3: Agents draft, humans decide. Who's really creating? 🤖✍️ #AI #agents".to_string(),
    ]));
    let critic = Arc::new(MockLlm::scripted(vec![
        "Too flat. Add a hook and more hashtags.".to_string(),
        "Better. End with a question to drive comments.".to_string(),
    ]));

    let runner = ReflectionRunner::from_llms(writer, critic, &ReflectionPrompts::default());
    println!("{}", generate_mermaid(&runner.topology()));

    match runner.invoke(&topic).await {
        Ok(state) => {
            for m in &state.messages {
                println!("[{}] {}", m.role(), m.content());
            }
        }
        Err(e) => eprintln!("error: {}", e),
    }
}

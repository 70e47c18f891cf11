//! Example: ask Gemini and Ollama the same question.
//!
//! Needs `GEMINI_API_KEY` (or `GOOGLE_API_KEY`) in the environment or `.env`, and a local
//! Ollama with `llama3.1:8b` pulled.
//!
//! Run: `cargo run -p quill-examples --example llm_check`

use quill::{build_llm, LlmConfig, LlmProvider, Message};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let question = Message::user("What is the capital of France?");

    for provider in [LlmProvider::Gemini, LlmProvider::Ollama] {
        println!("{} Response:", provider);
        let llm = match build_llm(&LlmConfig::new(provider)) {
            Ok(llm) => llm,
            Err(e) => {
                println!("  unavailable: {}\n", e);
                continue;
            }
        };
        match llm.invoke(std::slice::from_ref(&question)).await {
            Ok(resp) => println!("{}\n", resp.content.trim()),
            Err(e) => println!("  error: {}\n", e),
        }
    }
}

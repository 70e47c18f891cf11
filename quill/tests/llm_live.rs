//! Live provider checks. Ignored by default; run with
//! `cargo test -p quill --test llm_live -- --ignored` after setting `GEMINI_API_KEY`
//! (or starting Ollama with `llama3.1:8b`).


use quill::{build_llm, LlmConfig, LlmProvider, Message};

async fn ask_capital(provider: LlmProvider) -> String {
    dotenv::dotenv().ok();
    let llm = build_llm(&LlmConfig::new(provider)).unwrap();
    llm.invoke(&[Message::user("What is the capital of France?")])
        .await
        .unwrap()
        .content
}

#[tokio::test]
#[ignore = "needs GEMINI_API_KEY and network"]
async fn gemini_answers_capital_question() {
    let answer = ask_capital(LlmProvider::Gemini).await;
    assert!(answer.contains("Paris"), "answer: {}", answer);
}

#[tokio::test]
#[ignore = "needs a local Ollama server"]
async fn ollama_answers_capital_question() {
    let answer = ask_capital(LlmProvider::Ollama).await;
    assert!(answer.contains("Paris"), "answer: {}", answer);
}

//! ChatOllama against a local wiremock server, and a full reflection run over it.


use std::sync::Arc;

use quill::{
    build_llm, AgentError, LlmClient, LlmConfig, LlmProvider, Message, ProviderError,
    ReflectionPrompts, ReflectionRunner, Role,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ollama_config(server: &MockServer) -> LlmConfig {
    LlmConfig {
        base_url: Some(server.uri()),
        ..LlmConfig::new(LlmProvider::Ollama)
    }
}

fn reply(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "model": "llama3.1:8b",
        "message": { "role": "assistant", "content": content },
        "done": true,
        "prompt_eval_count": 12,
        "eval_count": 3
    }))
}

#[tokio::test]
async fn ollama_posts_non_streaming_chat_and_reads_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({
            "model": "llama3.1:8b",
            "stream": false,
            "messages": [{ "role": "user", "content": "What is the capital of France?" }]
        })))
        .respond_with(reply("Paris"))
        .expect(1)
        .mount(&server)
        .await;

    let llm = build_llm(&ollama_config(&server)).unwrap();
    let resp = llm
        .invoke(&[Message::user("What is the capital of France?")])
        .await
        .unwrap();
    assert_eq!(resp.content, "Paris");
    assert_eq!(resp.usage.map(|u| u.total_tokens), Some(15));
}

#[tokio::test]
async fn ollama_missing_model_maps_to_api_404() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404).set_body_string("model not found"))
        .mount(&server)
        .await;

    let llm = build_llm(&ollama_config(&server)).unwrap();
    let err = llm.invoke(&[Message::user("hi")]).await.unwrap_err();
    assert!(matches!(
        err,
        AgentError::Provider(ProviderError::Api { status: 404, .. })
    ));
}

#[tokio::test]
async fn ollama_huge_eval_counts_saturate_total() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": { "role": "assistant", "content": "ok" },
            "done": true,
            "prompt_eval_count": u32::MAX,
            "eval_count": 7
        })))
        .mount(&server)
        .await;

    let llm = build_llm(&ollama_config(&server)).unwrap();
    let usage = llm
        .invoke(&[Message::user("hi")])
        .await
        .unwrap()
        .usage
        .unwrap();
    assert_eq!(usage.completion_tokens, 7);
    assert_eq!(usage.total_tokens, u32::MAX);
}

/// **Scenario**: the whole loop runs over HTTP: five model calls, six messages.
#[tokio::test]
async fn reflection_run_over_ollama_makes_five_calls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(reply("ok"))
        .expect(5)
        .mount(&server)
        .await;

    let llm = build_llm(&ollama_config(&server)).unwrap();
    let runner = ReflectionRunner::from_llms(
        Arc::clone(&llm),
        llm,
        &ReflectionPrompts::new("generate", "reflect"),
    );
    let state = runner.invoke("topic").await.unwrap();
    assert_eq!(state.len(), 6);
    assert_eq!(state.last().map(Message::role), Some(Role::Generator));
    assert_eq!(state.total_usage.map(|u| u.total_tokens), Some(75));
}

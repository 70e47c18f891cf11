//! Unit tests for the reflection nodes: GenerateNode, ReflectNode.
//!
//! Each node is fed a ReflectionState and we assert the request the model saw and the
//! message the node appended.


use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quill::{
    AgentError, GenerateNode, LlmClient, LlmResponse, Message, MockLlm, Node, ProviderError,
    ReflectNode, ReflectionState, Role,
};

/// Records every request and replies with a fixed text.
struct RecordingLlm {
    reply: String,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl RecordingLlm {
    fn new(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: reply.to_string(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> Vec<Message> {
        self.seen.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl LlmClient for RecordingLlm {
    fn provider(&self) -> &str {
        "recording"
    }

    fn model(&self) -> &str {
        "recording"
    }

    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        Ok(LlmResponse::text(self.reply.clone()))
    }
}

fn drafted_state() -> ReflectionState {
    ReflectionState::seed("Rust 2026").append(Message::assistant("first draft"), None)
}

// --- GenerateNode ---

#[tokio::test]
async fn generate_node_id_is_generate() {
    let node = GenerateNode::new(Arc::new(MockLlm::fixed("x")), "p");
    assert_eq!(node.id(), "generate");
}

#[tokio::test]
async fn generate_node_sends_system_prompt_then_history_and_appends_assistant() {
    let llm = RecordingLlm::new("a post");
    let node = GenerateNode::new(llm.clone(), "write posts");
    let out = node.run(ReflectionState::seed("Rust 2026")).await.unwrap();

    assert_eq!(
        llm.last_request(),
        vec![Message::system("write posts"), Message::user("Rust 2026")]
    );
    assert_eq!(out.len(), 2);
    assert_eq!(out.messages[1], Message::assistant("a post"));
    assert_eq!(out.messages[1].role(), Role::Generator);
}

#[tokio::test]
async fn generate_node_with_blank_prompt_sends_history_only() {
    let llm = RecordingLlm::new("a post");
    let node = GenerateNode::new(llm.clone(), "  ");
    node.run(ReflectionState::seed("topic")).await.unwrap();
    assert_eq!(llm.last_request(), vec![Message::user("topic")]);
}

#[tokio::test]
async fn generate_node_propagates_provider_error_unchanged() {
    let node = GenerateNode::new(Arc::new(MockLlm::failing(401, "bad key")), "p");
    let err = node.run(ReflectionState::seed("topic")).await.unwrap_err();
    match err {
        AgentError::Provider(e) => {
            assert!(e.is_auth());
            assert!(matches!(e, ProviderError::Api { status: 401, .. }));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

// --- ReflectNode ---

#[tokio::test]
async fn reflect_node_id_is_reflect() {
    let node = ReflectNode::new(Arc::new(MockLlm::fixed("x")), "p");
    assert_eq!(node.id(), "reflect");
}

/// **Scenario**: the critique is appended with the human role so it reads as a new instruction.
#[tokio::test]
async fn reflect_node_appends_critique_as_human_message() {
    let llm = RecordingLlm::new("needs more hashtags");
    let node = ReflectNode::new(llm.clone(), "grade posts");
    let out = node.run(drafted_state()).await.unwrap();

    assert_eq!(
        llm.last_request(),
        vec![
            Message::system("grade posts"),
            Message::user("Rust 2026"),
            Message::assistant("first draft"),
        ]
    );
    assert_eq!(out.len(), 3);
    assert_eq!(out.messages[2], Message::user("needs more hashtags"));
    assert_eq!(out.messages[2].role(), Role::Human);
}

#[tokio::test]
async fn nodes_keep_earlier_messages_untouched() {
    let before = drafted_state();
    let node = ReflectNode::new(Arc::new(MockLlm::fixed("c")), "p");
    let after = node.run(before.clone()).await.unwrap();
    assert_eq!(&after.messages[..before.len()], &before.messages[..]);
}

//! Reflect node: critique the latest draft and feed it back as a human instruction.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ReflectionState;
use crate::Node;

use super::generate_node::with_system_prompt;

/// Node id of the critique step.
pub const REFLECT: &str = "reflect";

/// Appends one `Message::User` holding the critique, so the next Generate reads it as a
/// request to revise.
pub struct ReflectNode {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl ReflectNode {
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }
}

#[async_trait]
impl Node<ReflectionState> for ReflectNode {
    fn id(&self) -> &str {
        REFLECT
    }

    async fn run(&self, state: ReflectionState) -> Result<ReflectionState, AgentError> {
        let request = with_system_prompt(&self.system_prompt, &state.messages);
        let response = self.llm.invoke(&request).await?;
        Ok(state.append(Message::user(response.content), response.usage))
    }
}

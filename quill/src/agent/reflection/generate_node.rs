//! Generate node: call the generation model with the history, append its draft.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::ReflectionState;
use crate::Node;

/// Node id of the generation step.
pub const GENERATE: &str = "generate";

/// Builds the request for one model call: the system prompt (if any) then the transcript.
pub(super) fn with_system_prompt(system_prompt: &str, history: &[Message]) -> Vec<Message> {
    let mut request = Vec::with_capacity(history.len() + 1);
    if !system_prompt.trim().is_empty() {
        request.push(Message::system(system_prompt));
    }
    request.extend(history.iter().cloned());
    request
}

/// Appends one `Message::Assistant` with the generator's reply.
///
/// **Interaction**: Driven by `ReflectionRunner` on every `Step::Generate`.
pub struct GenerateNode {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
}

impl GenerateNode {
    pub fn new(llm: Arc<dyn LlmClient>, system_prompt: impl Into<String>) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
        }
    }
}

#[async_trait]
impl Node<ReflectionState> for GenerateNode {
    fn id(&self) -> &str {
        GENERATE
    }

    async fn run(&self, state: ReflectionState) -> Result<ReflectionState, AgentError> {
        let request = with_system_prompt(&self.system_prompt, &state.messages);
        let response = self.llm.invoke(&request).await?;
        Ok(state.append(Message::assistant(response.content), response.usage))
    }
}

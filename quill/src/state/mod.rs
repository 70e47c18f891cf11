//! Conversation state for the reflection loop.
//!
//! `ReflectionState` is the single value threaded through every node: an append-only,
//! chronological message list plus accumulated token usage.

use serde::{Deserialize, Serialize};

use crate::llm::LlmUsage;
use crate::message::{Message, Role};

/// Append-only conversation owned by one run.
///
/// Nodes never mutate earlier entries; [`ReflectionState::append`] consumes the state and
/// returns the extended one, so each step produces a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReflectionState {
    /// Transcript: seed first, then alternating generator / critique messages.
    pub messages: Vec<Message>,
    /// Sum of token usage reported by the providers for this run, when any reported it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_usage: Option<LlmUsage>,
}

impl ReflectionState {
    /// State holding exactly one seed message (human role).
    pub fn seed(topic: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(topic)],
            total_usage: None,
        }
    }

    /// Returns the state with `message` appended and `usage` added to the running total.
    pub fn append(self, message: Message, usage: Option<LlmUsage>) -> Self {
        let mut messages = self.messages;
        messages.push(message);
        let total_usage = match (self.total_usage, usage) {
            (Some(t), Some(u)) => Some(t.add(&u)),
            (None, Some(u)) => Some(u),
            (t, None) => t,
        };
        Self {
            messages,
            total_usage,
        }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Roles of the transcript in order.
    pub fn roles(&self) -> Vec<Role> {
        self.messages.iter().map(Message::role).collect()
    }

    /// Content of the most recent generator message (the latest draft).
    pub fn last_generation(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == Role::Generator)
            .map(Message::content)
    }

    /// Number of generator messages so far.
    pub fn generation_count(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| m.role() == Role::Generator)
            .count()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_holds_one_human_message() {
        let s = ReflectionState::seed("topic");
        assert_eq!(s.len(), 1);
        assert_eq!(s.roles(), vec![Role::Human]);
        assert!(s.total_usage.is_none());
    }

    /// **Scenario**: append keeps earlier messages as a prefix and sums usage.
    #[test]
    fn append_extends_and_accumulates_usage() {
        let s0 = ReflectionState::seed("t");
        let u = LlmUsage {
            prompt_tokens: 3,
            completion_tokens: 2,
            total_tokens: 5,
        };
        let s1 = s0.clone().append(Message::assistant("a"), Some(u.clone()));
        let s2 = s1.clone().append(Message::user("c"), Some(u));
        assert_eq!(&s2.messages[..s1.len()], &s1.messages[..]);
        assert_eq!(&s1.messages[..s0.len()], &s0.messages[..]);
        assert_eq!(s2.total_usage.as_ref().map(|u| u.total_tokens), Some(10));
    }

    #[test]
    fn append_without_usage_keeps_total() {
        let s = ReflectionState::seed("t").append(Message::assistant("a"), None);
        assert!(s.total_usage.is_none());
    }

    #[test]
    fn last_generation_and_generation_count() {
        let s = ReflectionState::seed("t")
            .append(Message::assistant("draft 1"), None)
            .append(Message::user("critique"), None)
            .append(Message::assistant("draft 2"), None);
        assert_eq!(s.last_generation(), Some("draft 2"));
        assert_eq!(s.generation_count(), 2);
        assert_eq!(ReflectionState::seed("t").last_generation(), None);
    }
}

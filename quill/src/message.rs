//! Minimal message types for conversation state.
//!
//! Roles: System (prompt sent to the model, never stored in the transcript), User (human
//! seed or critique fed back as an instruction) and Assistant (generator output).

use serde::{Deserialize, Serialize};

/// Author kind of a message, as seen by the reflection loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Human,
    Generator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Human => "human",
            Role::Generator => "generator",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single message in the conversation. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    /// System prompt; prepended by a node for one model call.
    System(String),
    /// Human input: the seed topic, or a critique that reads as a new instruction.
    User(String),
    /// Generator reply.
    Assistant(String),
}

impl Message {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::System(content.into())
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::User(content.into())
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::Assistant(content.into())
    }

    pub fn role(&self) -> Role {
        match self {
            Message::System(_) => Role::System,
            Message::User(_) => Role::Human,
            Message::Assistant(_) => Role::Generator,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Message::System(s) | Message::User(s) | Message::Assistant(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: system/user/assistant constructors produce the correct variant with content.
    #[test]
    fn message_system_user_assistant_constructors() {
        let sys = Message::system("s");
        assert!(matches!(&sys, Message::System(c) if c == "s"));
        let usr = Message::user("u");
        assert!(matches!(&usr, Message::User(c) if c == "u"));
        let ast = Message::assistant("a");
        assert!(matches!(&ast, Message::Assistant(c) if c == "a"));
    }

    /// **Scenario**: role() maps User to human and Assistant to generator.
    #[test]
    fn message_role_mapping() {
        assert_eq!(Message::system("s").role(), Role::System);
        assert_eq!(Message::user("u").role(), Role::Human);
        assert_eq!(Message::assistant("a").role(), Role::Generator);
        assert_eq!(Role::Generator.to_string(), "generator");
    }

    #[test]
    fn message_content_returns_text_for_every_variant() {
        for (msg, text) in [
            (Message::system("sys"), "sys"),
            (Message::user("usr"), "usr"),
            (Message::assistant("ast"), "ast"),
        ] {
            assert_eq!(msg.content(), text);
        }
    }

    /// **Scenario**: Role serializes lowercase so JSON transcripts read `"human"` / `"generator"`.
    #[test]
    fn role_serializes_lowercase() {
        let json = serde_json::to_string(&Role::Human).unwrap();
        assert_eq!(json, "\"human\"");
    }
}

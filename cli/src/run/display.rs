//! Transcript formatting for stdout and the verbose stderr display.

use quill::{Message, ReflectionState};
use serde_json::{json, Value};

/// Truncates a string to at most `max` chars; appends "..." when truncated. UTF-8 safe.
/// `max == 0` disables truncation.
pub(crate) fn truncate_display(s: &str, max: usize) -> String {
    const SUFFIX: &str = "...";
    if max == 0 || s.chars().count() <= max {
        return s.to_string();
    }
    if max <= SUFFIX.len() {
        return s.chars().take(max).collect();
    }
    let head: String = s.chars().take(max - SUFFIX.len()).collect();
    format!("{}{}", head, SUFFIX)
}

/// One message on one line: `role: content`, newlines flattened.
pub(crate) fn format_message_truncated(m: &Message, max: usize) -> String {
    let flat = m.content().replace('\n', " ");
    format!("{}: {}", m.role(), truncate_display(&flat, max))
}

/// Human-readable transcript: one numbered block per message, then the token total when known.
pub fn format_transcript(state: &ReflectionState) -> String {
    let mut out = String::new();
    for (i, m) in state.messages.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("=== [{}] {} ===\n", i + 1, m.role()));
        out.push_str(m.content().trim_end());
        out.push('\n');
    }
    if let Some(usage) = &state.total_usage {
        out.push_str(&format!(
            "\n--- {} generations, tokens: {} prompt + {} completion = {} ---\n",
            state.generation_count(),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens
        ));
    }
    out
}

/// JSON form of a finished run, used by `--json`.
pub fn transcript_json(topic: &str, state: &ReflectionState) -> Value {
    let messages: Vec<Value> = state
        .messages
        .iter()
        .map(|m| json!({ "role": m.role(), "content": m.content() }))
        .collect();
    json!({
        "topic": topic,
        "messages": messages,
        "generations": state.generation_count(),
        "final": state.last_generation(),
        "usage": state.total_usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill::LlmUsage;

    fn sample_state() -> ReflectionState {
        ReflectionState::seed("Rust")
            .append(Message::assistant("draft one"), None)
            .append(Message::user("more emojis"), None)
            .append(Message::assistant("draft two\n"), None)
    }

    #[test]
    fn truncate_display_handles_short_exact_and_truncated() {
        assert_eq!(truncate_display("abc", 10), "abc");
        assert_eq!(truncate_display("abc", 3), "abc");
        assert_eq!(truncate_display("abcdef", 3), "abc");
        assert_eq!(truncate_display("abcdefghij", 5), "ab...");
        assert_eq!(truncate_display("abcdefghij", 0), "abcdefghij");
    }

    #[test]
    fn truncate_display_is_char_safe() {
        let s = "🚀".repeat(10);
        let got = truncate_display(&s, 6);
        assert_eq!(got.chars().count(), 6);
        assert!(got.ends_with("..."));
    }

    #[test]
    fn format_message_uses_role_label_and_flattens_newlines() {
        assert_eq!(
            format_message_truncated(&Message::assistant("line one\nline two"), 100),
            "generator: line one line two"
        );
        assert_eq!(
            format_message_truncated(&Message::user("critique text"), 8),
            "human: criti..."
        );
    }

    #[test]
    fn transcript_numbers_messages_in_order() {
        let text = format_transcript(&sample_state());
        let first = text.find("=== [1] human ===").unwrap();
        let last = text.find("=== [4] generator ===").unwrap();
        assert!(first < last);
        assert!(text.contains("draft two\n"));
        assert!(!text.contains("tokens:"));
    }

    #[test]
    fn transcript_reports_usage_when_present() {
        let mut state = sample_state();
        state.total_usage = Some(LlmUsage {
            prompt_tokens: 10,
            completion_tokens: 5,
            total_tokens: 15,
        });
        let text = format_transcript(&state);
        assert!(text.contains("2 generations, tokens: 10 prompt + 5 completion = 15"));
    }

    #[test]
    fn json_has_roles_final_draft_and_usage() {
        let v = transcript_json("Rust", &sample_state());
        assert_eq!(v["topic"], "Rust");
        assert_eq!(v["messages"].as_array().map(Vec::len), Some(4));
        assert_eq!(v["messages"][0]["role"], "human");
        assert_eq!(v["messages"][1]["role"], "generator");
        assert_eq!(v["generations"], 2);
        assert_eq!(v["final"], "draft two\n");
        assert!(v["usage"].is_null());
    }
}

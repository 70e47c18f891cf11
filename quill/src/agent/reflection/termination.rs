//! Stop condition for the reflection loop.
//!
//! Evaluated only right after a Generate step. `true` ends the run; `false` routes to Reflect.

use crate::state::ReflectionState;

/// Default message-count threshold: the run ends once the transcript holds more than 4 messages.
pub const DEFAULT_MAX_MESSAGES: i64 = 4;

/// Decides whether the loop ends after a Generate step.
///
/// Implemented by [`MessageCountPolicy`] and by any `Fn(&ReflectionState) -> bool`, so the
/// bound can change without touching node code.
pub trait TerminationPolicy: Send + Sync {
    fn should_end(&self, state: &ReflectionState) -> bool;

    /// Short label for the ending branch, used in graph rendering.
    fn describe(&self) -> String {
        "should_end".to_string()
    }
}

/// Ends the run when `len(messages) > threshold`.
///
/// Strictly greater-than. A zero or negative threshold ends after the first Generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MessageCountPolicy {
    pub threshold: i64,
}

impl MessageCountPolicy {
    pub fn new(threshold: i64) -> Self {
        Self { threshold }
    }
}

impl Default for MessageCountPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_MESSAGES)
    }
}

impl TerminationPolicy for MessageCountPolicy {
    fn should_end(&self, state: &ReflectionState) -> bool {
        i64::try_from(state.len()).map_or(true, |len| len > self.threshold)
    }

    fn describe(&self) -> String {
        format!("len > {}", self.threshold)
    }
}

impl<F> TerminationPolicy for F
where
    F: Fn(&ReflectionState) -> bool + Send + Sync,
{
    fn should_end(&self, state: &ReflectionState) -> bool {
        self(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Message;

    fn state_with(n: usize) -> ReflectionState {
        let mut s = ReflectionState::seed("t");
        for i in 1..n {
            s = s.append(Message::assistant(format!("m{}", i)), None);
        }
        s
    }

    #[test]
    fn default_threshold_is_strictly_greater_than_four() {
        let p = MessageCountPolicy::default();
        assert!(!p.should_end(&state_with(4)));
        assert!(p.should_end(&state_with(5)));
        assert_eq!(p.describe(), "len > 4");
    }

    #[test]
    fn non_positive_threshold_always_ends() {
        assert!(MessageCountPolicy::new(0).should_end(&state_with(1)));
        assert!(MessageCountPolicy::new(-3).should_end(&state_with(1)));
    }

    #[test]
    fn closure_is_a_policy() {
        let p = |s: &ReflectionState| s.generation_count() >= 2;
        assert!(!p.should_end(&state_with(2)));
        assert!(p.should_end(&state_with(3)));
        assert_eq!(TerminationPolicy::describe(&p), "should_end");
    }
}

//! System prompts for the generate and reflect nodes.
//!
//! Default text lives in `quill/prompts/reflection.yaml` (embedded). A prompts directory and
//! env vars can override it; see [`load`] and [`load_or_default`].

mod load;

pub use load::{default_from_embedded, load, load_or_default, LoadError};

use serde::Deserialize;

/// Env var overriding the generation prompt.
pub const ENV_GENERATION_PROMPT: &str = "GENERATION_SYSTEM_PROMPT";
/// Env var overriding the reflection prompt.
pub const ENV_REFLECTION_PROMPT: &str = "REFLECTION_SYSTEM_PROMPT";

/// On-disk shape of `reflection.yaml`. Missing keys keep the embedded default.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReflectionPromptsFile {
    pub generation_system_prompt: Option<String>,
    pub reflection_system_prompt: Option<String>,
}

/// Resolved prompts used by `GenerateNode` and `ReflectNode`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReflectionPrompts {
    pub generation: String,
    pub reflection: String,
}

impl ReflectionPrompts {
    pub fn new(generation: impl Into<String>, reflection: impl Into<String>) -> Self {
        Self {
            generation: generation.into(),
            reflection: reflection.into(),
        }
    }

    /// Overlays the values present in `file`.
    pub fn merge_file(mut self, file: ReflectionPromptsFile) -> Self {
        if let Some(s) = file.generation_system_prompt {
            self.generation = s;
        }
        if let Some(s) = file.reflection_system_prompt {
            self.reflection = s;
        }
        self
    }

    /// Applies `GENERATION_SYSTEM_PROMPT` / `REFLECTION_SYSTEM_PROMPT` when set and non-empty.
    pub fn apply_env(self) -> Self {
        let from_env = |k: &str| std::env::var(k).ok().filter(|s| !s.trim().is_empty());
        self.merge_file(ReflectionPromptsFile {
            generation_system_prompt: from_env(ENV_GENERATION_PROMPT),
            reflection_system_prompt: from_env(ENV_REFLECTION_PROMPT),
        })
    }
}

impl Default for ReflectionPrompts {
    fn default() -> Self {
        default_from_embedded()
    }
}

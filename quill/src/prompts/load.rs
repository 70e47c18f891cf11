//! Load reflection prompts from a directory of YAML files and apply env overrides.
//!
//! **Canonical source**: Default prompt text lives in `quill/prompts/reflection.yaml`; it is
//! embedded at compile time and used when no `PROMPTS_DIR` or directory is present.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ReflectionPrompts, ReflectionPromptsFile};

const EMBED_REFLECTION: &str = include_str!("../../prompts/reflection.yaml");

/// File name looked up inside the prompts directory.
const REFLECTION_FILE: &str = "reflection.yaml";

/// Default directory name when `PROMPTS_DIR` is not set.
const DEFAULT_PROMPTS_DIR: &str = "prompts";

/// Error when loading prompts from a directory (missing dir, unreadable file, invalid YAML).
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("prompts directory not found or not readable: {0}")]
    DirNotFound(String),
    #[error("failed to read prompts file {path}: {message}")]
    ReadFile { path: String, message: String },
    #[error("failed to parse YAML in {path}: {message}")]
    ParseYaml { path: String, message: String },
}

/// Returns `dir` if `Some`, else `PROMPTS_DIR` env, else `DEFAULT_PROMPTS_DIR`.
fn prompts_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(PathBuf::from).unwrap_or_else(|| {
        std::env::var("PROMPTS_DIR")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR))
    })
}

/// Reads and parses `dir/name`. A missing file is `Ok(None)`.
fn read_yaml_file<T>(dir: &Path, name: &str) -> Result<Option<T>, LoadError>
where
    T: for<'de> Deserialize<'de>,
{
    let path = dir.join(name);
    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(LoadError::ReadFile {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        }
    };
    let value: T = serde_yaml::from_str(&content).map_err(|e| LoadError::ParseYaml {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(Some(value))
}

fn embedded() -> ReflectionPrompts {
    let file: ReflectionPromptsFile = serde_yaml::from_str(EMBED_REFLECTION).unwrap_or_default();
    ReflectionPrompts::new(
        file.generation_system_prompt.unwrap_or_default(),
        file.reflection_system_prompt.unwrap_or_default(),
    )
}

/// Loads prompts from a directory: reads `reflection.yaml` over the embedded defaults, then
/// applies env overrides.
///
/// If `dir` is `None`, uses `PROMPTS_DIR` env or `./prompts`. A missing file keeps the
/// defaults; a missing directory or a file that fails to parse is an error.
pub fn load(dir: Option<&Path>) -> Result<ReflectionPrompts, LoadError> {
    let base = prompts_dir(dir);
    if !base.is_dir() {
        return Err(LoadError::DirNotFound(base.display().to_string()));
    }
    let file = read_yaml_file::<ReflectionPromptsFile>(&base, REFLECTION_FILE)?.unwrap_or_default();
    Ok(embedded().merge_file(file).apply_env())
}

/// Returns default prompts by parsing the embedded YAML, with env overrides applied.
pub fn default_from_embedded() -> ReflectionPrompts {
    embedded().apply_env()
}

/// Loads prompts from `dir` if the directory exists; otherwise returns the embedded defaults.
///
/// A present but broken file is logged and ignored.
pub fn load_or_default(dir: Option<&Path>) -> ReflectionPrompts {
    match load(dir) {
        Ok(p) => p,
        Err(LoadError::DirNotFound(_)) => default_from_embedded(),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring prompts directory");
            default_from_embedded()
        }
    }
}

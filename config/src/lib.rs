//! Load configuration from XDG `config.toml` and project `.env`, then apply to the process
//! environment with priority: **existing env > .env > XDG**.
//!
//! The quill CLI calls [`load_and_apply`] once at startup, before
//! `ReflectionBuildConfig::from_env` reads `LLM_*` and `REFLECTION_*` variables.

mod dotenv;
mod xdg_toml;

use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

pub use xdg_toml::config_file_path;

/// App name used for `$XDG_CONFIG_HOME/quill/config.toml`.
pub const APP_NAME: &str = "quill";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("read .env: {0}")]
    Dotenv(#[source] ::dotenv::Error),
}

/// Where an applied variable came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnvSource {
    DotEnv,
    Xdg,
}

/// Keys that [`load_and_apply`] set, with their source. Keys already present in the
/// environment are not listed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Applied {
    pub keys: BTreeMap<String, EnvSource>,
}

impl Applied {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn source_of(&self, key: &str) -> Option<EnvSource> {
        self.keys.get(key).copied()
    }
}

/// Loads config from XDG `config.toml` and optional project `.env`, then sets environment
/// variables only for keys that are **not** already set.
///
/// When a key is missing from the process environment:
/// 1. value from project `.env` (current directory, or `override_dir` if given)
/// 2. value from `$XDG_CONFIG_HOME/<app_name>/config.toml` `[env]` table
pub fn load_and_apply(app_name: &str, override_dir: Option<&Path>) -> Result<Applied, LoadError> {
    let xdg_map = xdg_toml::load_env_map(app_name)?;
    let dotenv_map = dotenv::load_env_map(override_dir).map_err(LoadError::Dotenv)?;

    let mut applied = Applied::default();
    let candidates = dotenv_map
        .iter()
        .map(|(k, v)| (k, v, EnvSource::DotEnv))
        .chain(
            xdg_map
                .iter()
                .filter(|(k, _)| !dotenv_map.contains_key(*k))
                .map(|(k, v)| (k, v, EnvSource::Xdg)),
        );

    for (key, value, source) in candidates {
        if std::env::var_os(key).is_some() {
            continue;
        }
        std::env::set_var(key, value);
        applied.keys.insert(key.clone(), source);
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_APP: &str = "quill-config-nonexistent-app-xyz";

    fn write_xdg(root: &Path, app: &str, body: &str) {
        let app_dir = root.join(app);
        std::fs::create_dir_all(&app_dir).unwrap();
        std::fs::write(app_dir.join("config.toml"), body).unwrap();
    }

    #[test]
    fn existing_env_wins() {
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(dotenv_dir.path().join(".env"), "QUILL_TEST_EXISTING=from_file\n").unwrap();

        temp_env::with_var("QUILL_TEST_EXISTING", Some("from_env"), || {
            let applied = load_and_apply(NO_APP, Some(dotenv_dir.path())).unwrap();
            assert_eq!(
                std::env::var("QUILL_TEST_EXISTING").as_deref(),
                Ok("from_env")
            );
            assert!(applied.source_of("QUILL_TEST_EXISTING").is_none());
        });
    }

    #[test]
    fn nothing_to_load_is_ok_and_empty() {
        let empty = tempfile::tempdir().unwrap();
        let applied = load_and_apply(NO_APP, Some(empty.path())).unwrap();
        assert!(applied.is_empty());
    }

    #[test]
    fn dotenv_overrides_xdg() {
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(
            xdg_dir.path(),
            APP_NAME,
            "[env]\nQUILL_TEST_PRIORITY = \"from_xdg\"\nQUILL_TEST_XDG_ONLY = \"xdg\"\n",
        );
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dotenv_dir.path().join(".env"),
            "QUILL_TEST_PRIORITY=from_dotenv\n",
        )
        .unwrap();

        temp_env::with_vars(
            [
                ("XDG_CONFIG_HOME", Some(xdg_dir.path().as_os_str())),
                ("QUILL_TEST_PRIORITY", None),
                ("QUILL_TEST_XDG_ONLY", None),
            ],
            || {
                let applied = load_and_apply(APP_NAME, Some(dotenv_dir.path())).unwrap();
                assert_eq!(
                    std::env::var("QUILL_TEST_PRIORITY").as_deref(),
                    Ok("from_dotenv")
                );
                assert_eq!(std::env::var("QUILL_TEST_XDG_ONLY").as_deref(), Ok("xdg"));
                assert_eq!(
                    applied.source_of("QUILL_TEST_PRIORITY"),
                    Some(EnvSource::DotEnv)
                );
                assert_eq!(applied.source_of("QUILL_TEST_XDG_ONLY"), Some(EnvSource::Xdg));
            },
        );
    }

    #[test]
    fn malformed_dotenv_fails_with_dotenv_error() {
        let dotenv_dir = tempfile::tempdir().unwrap();
        std::fs::write(dotenv_dir.path().join(".env"), "NOT_A_PAIR\n").unwrap();
        let result = load_and_apply(NO_APP, Some(dotenv_dir.path()));
        assert!(matches!(result, Err(LoadError::Dotenv(_))));
    }

    #[test]
    fn invalid_xdg_toml_fails_with_xdg_parse_error() {
        let xdg_dir = tempfile::tempdir().unwrap();
        write_xdg(xdg_dir.path(), APP_NAME, "invalid [[[\n");
        let empty = tempfile::tempdir().unwrap();

        temp_env::with_var("XDG_CONFIG_HOME", Some(xdg_dir.path().as_os_str()), || {
            let result = load_and_apply(APP_NAME, Some(empty.path()));
            assert!(matches!(result, Err(LoadError::XdgParse(_))));
        });
    }
}

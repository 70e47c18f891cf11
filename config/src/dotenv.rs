//! Read a project `.env` file into a key-value map with the `dotenv` crate. Applying the
//! values to the process environment happens in `lib`, after the priority merge.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn dotenv_path(override_dir: Option<&Path>) -> Option<PathBuf> {
    let dir = override_dir
        .map(Path::to_path_buf)
        .or_else(|| std::env::current_dir().ok())?;
    let path = dir.join(".env");
    path.is_file().then_some(path)
}

/// Missing file returns an empty map. A malformed line fails the whole file.
///
/// `dotenv::from_path_iter` only parses; it never sets variables itself. `$VAR`
/// substitution in unquoted and double-quoted values follows `dotenv` rules.
pub fn load_env_map(override_dir: Option<&Path>) -> Result<HashMap<String, String>, dotenv::Error> {
    let Some(path) = dotenv_path(override_dir) else {
        return Ok(HashMap::new());
    };
    dotenv::from_path_iter(&path)?.collect()
}

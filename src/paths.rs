//! Where stash-wizard keeps its per-repository data.
//!
//! Data lives under `~/.stash-wizard/projects/<name>-<hash>/`, or under
//! `$STASH_WIZARD_HOME/projects/...` when that variable is set.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "STASH_WIZARD_HOME";

const DATA_DIR_NAME: &str = ".stash-wizard";

/// File the wizard event log is appended to.
pub const EVENTS_FILENAME: &str = "wizard-events.jsonl";

/// The base data directory, or `None` if no home directory is known.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// The data directory for one repository.
#[must_use]
pub fn project_data_dir(repo_dir: &Path) -> Option<PathBuf> {
    data_dir().map(|base| base.join("projects").join(project_dir_name(repo_dir)))
}

/// The event log for one repository.
#[must_use]
pub fn events_path(repo_dir: &Path) -> Option<PathBuf> {
    project_data_dir(repo_dir).map(|dir| dir.join(EVENTS_FILENAME))
}

/// `<last-component>-<hash>`: readable, and unique per canonical path.
fn project_dir_name(repo_dir: &Path) -> String {
    let path = repo_dir.canonicalize().unwrap_or_else(|_| repo_dir.to_path_buf());

    let prefix: String = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("repo")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect();
    let prefix = match prefix.trim_matches('-') {
        "" => "repo",
        trimmed => trimmed,
    };

    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    format!("{prefix}-{:016x}", hasher.finish())
}

//! Git operations module.

mod stash;

pub use stash::{parse_stash_list, GitStashProvider};

use crate::error::{Error, Result};
use crate::traits::CommandRunner;
use std::path::{Path, PathBuf};

/// Run `git -C <dir> <args>` and return stdout, or fail with the combined output.
///
/// # Errors
///
/// Returns [`Error::CommandFailed`] if git exits unsuccessfully, or an I/O
/// error if git cannot be run.
pub fn git_in(runner: &dyn CommandRunner, dir: &Path, args: &[&str]) -> Result<String> {
    let dir_str = dir.to_string_lossy();
    let mut full: Vec<&str> = vec!["-C", &*dir_str];
    full.extend_from_slice(args);

    let output = runner.run("git", &full)?;
    if output.success() {
        Ok(output.stdout)
    } else {
        Err(Error::CommandFailed {
            command: format!("git {}", args.join(" ")),
            exit_code: output.exit_code,
            output: output.combined_output(),
        })
    }
}

/// The root of the working tree containing `dir`, if any.
pub fn toplevel(runner: &dyn CommandRunner, dir: &Path) -> Option<PathBuf> {
    git_in(runner, dir, &["rev-parse", "--show-toplevel"])
        .ok()
        .map(|out| out.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

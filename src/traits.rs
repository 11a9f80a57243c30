//! Core traits for testability and abstraction.
//!
//! The wizard engine only talks to the outside world through these seams:
//! [`StashProvider`] for version-control work, [`Presenter`] for asking the
//! user, and [`CommandRunner`] for spawning processes.

use crate::error::Result;
use crate::model::{Changeset, Repository, RevealOptions, RevealTarget, StashFlags};
use crate::wizard::{Response, Step};
use std::path::{Path, PathBuf};

/// Output from a command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    /// The exit code of the command.
    pub exit_code: i32,
    /// The stdout output.
    pub stdout: String,
    /// The stderr output.
    pub stderr: String,
}

impl CommandOutput {
    /// Check if the command succeeded (exit code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Get combined stdout and stderr.
    #[must_use]
    pub fn combined_output(&self) -> String {
        match (self.stdout.trim_end(), self.stderr.trim_end()) {
            (out, "") => out.to_string(),
            ("", err) => err.to_string(),
            (out, err) => format!("{out}\n{err}"),
        }
    }
}

/// Trait for running external commands.
pub trait CommandRunner {
    /// Run a program with the given arguments.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or waited on. A
    /// non-zero exit status is not an error at this level.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// The version-control operations the wizard drives.
///
/// Terminal operations return the tool's output on success so callers can
/// show it; failures carry the tool's description for classification.
pub trait StashProvider {
    /// Enumerate selectable repositories, in display order.
    ///
    /// # Errors
    ///
    /// Returns an error if repositories cannot be discovered.
    fn list_contexts(&self) -> Result<Vec<Repository>>;

    /// The repository to pre-select, if any.
    fn active_context(&self) -> Option<Repository>;

    /// List the stashes of a repository. `None` means there are none.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails.
    fn list_changesets(&self, repo: &Path) -> Result<Option<Vec<Changeset>>>;

    /// Paths touched by a stash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stash cannot be read.
    fn changeset_files(&self, repo: &Path, changeset: &Changeset) -> Result<Vec<String>>;

    /// Apply a stash, removing it afterwards when `remove` is set (pop).
    ///
    /// # Errors
    ///
    /// Returns an error if the stash cannot be applied.
    fn apply_changeset(&self, repo: &Path, changeset: &Changeset, remove: bool) -> Result<String>;

    /// Delete a stash.
    ///
    /// # Errors
    ///
    /// Returns an error if the stash cannot be deleted.
    fn delete_changeset(&self, repo: &Path, changeset: &Changeset) -> Result<String>;

    /// Save working tree changes as a new stash.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing could be stashed.
    fn save_changeset(
        &self,
        repo: &Path,
        message: &str,
        paths: &[PathBuf],
        flags: StashFlags,
    ) -> Result<String>;

    /// Reveal a target in a companion view. Returns text to display, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be shown.
    fn reveal(&self, target: &RevealTarget, options: RevealOptions) -> Result<Option<String>>;
}

/// Trait for resolving steps to answers.
pub trait Presenter {
    /// Show a step and wait for exactly one response.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be asked (for example on I/O failure).
    fn present(&mut self, step: &Step) -> Result<Response>;
}

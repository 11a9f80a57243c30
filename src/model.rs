//! Domain types shared by the wizard engine and its collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// The stash subcommands the wizard knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subcommand {
    /// Apply a stash to the working tree and keep it.
    Apply,
    /// Delete a stash.
    Drop,
    /// Browse stashes.
    List,
    /// Apply a stash to the working tree and delete it.
    Pop,
    /// Save the working tree changes as a new stash.
    Push,
}

impl Subcommand {
    /// All subcommands, in menu order.
    pub const ALL: [Self; 5] = [Self::Apply, Self::Drop, Self::List, Self::Pop, Self::Push];

    /// The git verb.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Drop => "drop",
            Self::List => "list",
            Self::Pop => "pop",
            Self::Push => "push",
        }
    }

    /// Capitalized label for menus and titles.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Apply => "Apply",
            Self::Drop => "Drop",
            Self::List => "List",
            Self::Pop => "Pop",
            Self::Push => "Push",
        }
    }

    /// One-line description shown next to the subcommand in the first step.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Apply => "integrates changes from the specified stash into the current branch",
            Self::Drop => "deletes the specified stash",
            Self::List => "lists the saved stashes",
            Self::Pop => {
                "integrates changes from the specified stash into the current branch and deletes the stash"
            }
            Self::Push => {
                "saves your local changes to a new stash and discards them from the working tree and index"
            }
        }
    }

    /// Key used in `skip_confirmations` for this subcommand.
    #[must_use]
    pub fn confirm_key(self) -> String {
        format!("stash-{}:command", self.as_str())
    }

    /// Apply and pop are each other's counterpart; other subcommands have none.
    #[must_use]
    pub const fn counterpart(self) -> Option<Self> {
        match self {
            Self::Apply => Some(Self::Pop),
            Self::Pop => Some(Self::Apply),
            Self::Drop | Self::List | Self::Push => None,
        }
    }

    /// Parse a subcommand name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == name)
    }
}

impl fmt::Display for Subcommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flag passed to `git stash push`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PushFlag {
    /// `--include-untracked`
    IncludeUntracked,
    /// `--keep-index`
    KeepIndex,
}

impl PushFlag {
    /// The git command line switch.
    #[must_use]
    pub const fn as_arg(self) -> &'static str {
        match self {
            Self::IncludeUntracked => "--include-untracked",
            Self::KeepIndex => "--keep-index",
        }
    }
}

/// Options for saving a new stash.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StashFlags {
    /// Include untracked files.
    pub include_untracked: bool,
    /// Leave staged changes in the index.
    pub keep_index: bool,
}

impl StashFlags {
    /// Build flags from the pre-composed bundle a menu row carries.
    #[must_use]
    pub fn from_flags(flags: &[PushFlag]) -> Self {
        Self {
            include_untracked: flags.contains(&PushFlag::IncludeUntracked),
            keep_index: flags.contains(&PushFlag::KeepIndex),
        }
    }
}

/// A repository the wizard can operate against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Display name (usually the directory name).
    pub name: String,
    /// Root of the working tree.
    pub path: PathBuf,
}

impl Repository {
    /// Create a repository whose name is the last path component.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map_or_else(|| path.display().to_string(), ToString::to_string);
        Self { name, path }
    }

    /// Root of the working tree.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A saved stash entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    /// Reflog name, e.g. `stash@{0}`.
    pub ref_name: String,
    /// Commit SHA of the stash.
    pub sha: String,
    /// User supplied message (without the "On branch:" prefix).
    pub message: String,
    /// Branch the stash was created on, if known.
    pub branch: Option<String>,
    /// When the stash was created.
    pub date: DateTime<Utc>,
    /// Repository the stash belongs to.
    pub repo_path: PathBuf,
}

impl Changeset {
    /// Eight character abbreviation of the SHA.
    #[must_use]
    pub fn short_sha(&self) -> &str {
        self.sha.get(..8).unwrap_or(&self.sha)
    }

    /// `stash@{0}: message` form used in prompts.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("{}: {}", self.ref_name, self.message)
    }
}

/// What a reveal request points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RevealTarget {
    /// One stash.
    Changeset(Changeset),
    /// Every stash of a repository.
    Repository(PathBuf),
}

/// How a companion view should reveal its target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RevealOptions {
    /// Select the target.
    pub select: bool,
    /// Expand the target's children.
    pub expand: bool,
    /// Move focus to the view.
    pub focus: bool,
}

/// Failure reasons a collaborator can report without relying on message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StashFailure {
    /// Applying would overwrite local modifications.
    WorkingChanges,
    /// The stash was applied but left conflicts.
    Conflicts,
    /// The installed git is too old for the requested operation.
    UnsupportedGitVersion,
    /// There was nothing to stash.
    NothingToSave,
}

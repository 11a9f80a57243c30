//! How a wizard invocation ends.

use super::classify::{Report, Severity};
use crate::model::{Changeset, StashFlags, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// The single mutating operation a chain ends with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Terminal {
    /// Apply a stash, deleting it afterwards when `remove` is set.
    Apply {
        /// Repository root.
        repo: PathBuf,
        /// The stash.
        changeset: Changeset,
        /// Pop instead of apply.
        remove: bool,
    },
    /// Delete a stash.
    Drop {
        /// Repository root.
        repo: PathBuf,
        /// The stash.
        changeset: Changeset,
    },
    /// Save working tree changes as a new stash.
    Push {
        /// Repository root.
        repo: PathBuf,
        /// Stash message, possibly empty.
        message: String,
        /// File scope restriction.
        paths: Vec<PathBuf>,
        /// Push options.
        flags: StashFlags,
    },
}

impl Terminal {
    /// The subcommand this operation performs.
    #[must_use]
    pub const fn subcommand(&self) -> Subcommand {
        match self {
            Self::Apply { remove: true, .. } => Subcommand::Pop,
            Self::Apply { remove: false, .. } => Subcommand::Apply,
            Self::Drop { .. } => Subcommand::Drop,
            Self::Push { .. } => Subcommand::Push,
        }
    }
}

/// The result of one wizard invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Outcome {
    /// The terminal operation succeeded.
    Completed {
        /// What was done.
        terminal: Terminal,
        /// Output of the underlying tool.
        output: String,
    },
    /// Something failed and was classified.
    Reported(Report),
    /// The user navigated back out of the wizard.
    Back,
    /// The user aborted.
    Cancelled,
}

impl Outcome {
    /// Whether the invocation ended without a failure.
    ///
    /// Informational reports (for example conflicts) count as success since the
    /// operation did take effect.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        match self {
            Self::Completed { .. } | Self::Back | Self::Cancelled => true,
            Self::Reported(report) => matches!(report.severity, Severity::Info),
        }
    }

    /// The terminal operation, if one succeeded.
    #[must_use]
    pub const fn terminal(&self) -> Option<&Terminal> {
        match self {
            Self::Completed { terminal, .. } => Some(terminal),
            _ => None,
        }
    }
}

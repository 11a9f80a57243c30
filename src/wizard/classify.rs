//! Classification of failures into user-facing reports.
//!
//! A structured [`StashFailure`] from the collaborator wins. Otherwise the
//! failure text is matched against a small per-subcommand pattern table;
//! these patterns follow git's English wording and are best effort.

use crate::error::Error;
use crate::model::{StashFailure, Subcommand};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// How a report should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Expected condition, nothing was changed.
    Warning,
    /// Partial success.
    Info,
    /// Unexpected failure.
    Failure,
}

/// A classified failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Subcommand the failure is attributed to.
    pub subcommand: Subcommand,
    /// Presentation severity.
    pub severity: Severity,
    /// Message for the user.
    pub message: String,
    /// The underlying failure description.
    pub detail: String,
}

static WORKING_CHANGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)would be overwritten|local changes to the following files").unwrap()
});

static CONFLICTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\bCONFLICT\b|merged with conflicts|unmerged").unwrap());

static OLD_GIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)newer version of git|requires git \d|unknown (?:option|switch)").unwrap()
});

static NOTHING_TO_SAVE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)no local changes to save").unwrap());

/// Classify a failure for the given subcommand.
#[must_use]
pub fn classify(subcommand: Subcommand, error: &Error) -> Report {
    let detail = error.description_text();
    let reason = match error {
        Error::Stash { reason: Some(reason), .. } => Some(*reason),
        _ => match_reason(subcommand, &detail),
    };

    let (severity, message) = match reason {
        Some(reason) => known_message(subcommand, reason, &detail),
        None => (Severity::Failure, generic_message(subcommand)),
    };

    Report { subcommand, severity, message, detail }
}

fn match_reason(subcommand: Subcommand, text: &str) -> Option<StashFailure> {
    match subcommand {
        Subcommand::Apply | Subcommand::Pop => {
            if WORKING_CHANGES.is_match(text) {
                Some(StashFailure::WorkingChanges)
            } else if CONFLICTS.is_match(text) {
                Some(StashFailure::Conflicts)
            } else {
                None
            }
        }
        Subcommand::Push => {
            if OLD_GIT.is_match(text) {
                Some(StashFailure::UnsupportedGitVersion)
            } else if NOTHING_TO_SAVE.is_match(text) {
                Some(StashFailure::NothingToSave)
            } else {
                None
            }
        }
        Subcommand::Drop | Subcommand::List => None,
    }
}

fn known_message(subcommand: Subcommand, reason: StashFailure, detail: &str) -> (Severity, String) {
    match reason {
        StashFailure::WorkingChanges => (
            Severity::Warning,
            format!(
                "Unable to {} stash. Your working tree changes would be overwritten. \
                 Please commit or stash your changes before trying again",
                subcommand.as_str()
            ),
        ),
        StashFailure::Conflicts => (
            Severity::Info,
            "Stash applied with conflicts. Resolve the conflicts in your working tree".to_string(),
        ),
        StashFailure::UnsupportedGitVersion => {
            let first_line = detail.lines().next().unwrap_or_default().trim();
            (Severity::Warning, format!("Unable to stash changes. {first_line}"))
        }
        StashFailure::NothingToSave => (Severity::Info, "No local changes to save".to_string()),
    }
}

fn generic_message(subcommand: Subcommand) -> String {
    match subcommand {
        Subcommand::Apply => "Unable to apply stash".to_string(),
        Subcommand::Pop => "Unable to pop stash".to_string(),
        Subcommand::Drop => "Unable to delete stash".to_string(),
        Subcommand::List => "Unable to list stashes".to_string(),
        Subcommand::Push => "Unable to stash changes".to_string(),
    }
}

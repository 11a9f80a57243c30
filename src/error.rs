//! Error types for `stash_wizard`.

use crate::model::StashFailure;

/// Errors that can occur while driving a stash wizard.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON serialization error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A command exited unsuccessfully.
    #[error("Command '{command}' failed with exit code {exit_code}: {output}")]
    CommandFailed {
        /// The command line that was run.
        command: String,
        /// The exit code.
        exit_code: i32,
        /// Combined stdout and stderr.
        output: String,
    },

    /// Git produced output we could not understand.
    #[error("Git error: {0}")]
    Git(String),

    /// A stash operation failed with a reason the collaborator recognised.
    #[error("{message}")]
    Stash {
        /// Structured reason, when the collaborator knows it.
        reason: Option<StashFailure>,
        /// Human readable description.
        message: String,
    },

    /// The response does not fit the step it answers.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The wizard already produced an outcome.
    #[error("Wizard has already finished")]
    WizardFinished,

    /// There is no repository to operate on.
    #[error("No repositories found")]
    NoRepositories,
}

impl Error {
    /// Text the failure classifier matches against.
    #[must_use]
    pub fn description_text(&self) -> String {
        match self {
            Self::CommandFailed { output, .. } => output.clone(),
            Self::Stash { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

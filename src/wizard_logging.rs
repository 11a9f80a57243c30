//! Debug event logging for wizard invocations.
//!
//! When `debug_logging` is enabled in the config, every prompt, response and
//! outcome is appended as a JSONL line to the repository's
//! `wizard-events.jsonl` (see [`crate::paths`]). Write errors are ignored;
//! logging never changes the wizard's behaviour.

use crate::config::WizardConfig;
use crate::paths;
use crate::wizard::{Outcome, Response, Step, StepId};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One loggable wizard event.
#[derive(Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent<'a> {
    /// A step was yielded to the presentation layer.
    Prompt {
        /// The step.
        step: &'a Step,
    },
    /// The presentation layer answered a step.
    Response {
        /// Which step was answered.
        step: StepId,
        /// The answer.
        response: &'a Response,
    },
    /// The invocation ended.
    Outcome {
        /// How it ended.
        outcome: &'a Outcome,
    },
}

/// An append-only JSONL event log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    /// Log to an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log for `repo_dir`, if `config` enables debug logging.
    #[must_use]
    pub fn for_repository(repo_dir: &Path, config: &WizardConfig) -> Option<Self> {
        if !config.debug_logging {
            return None;
        }
        paths::events_path(repo_dir).map(Self::at)
    }

    /// Where events are written.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one event.
    pub fn record(&self, event: &WizardEvent<'_>) {
        if let Some(parent) = self.path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let Ok(mut value) = serde_json::to_value(event) else {
            return;
        };
        if let Some(map) = value.as_object_mut() {
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }

        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&self.path) else {
            return;
        };
        let _ = writeln!(file, "{value}");
    }
}

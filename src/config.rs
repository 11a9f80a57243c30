//! Configuration management for stash-wizard.
//!
//! This module handles the `.stash-wizard/config.yaml` file which stores
//! remembered preferences (which confirmations to skip), extra repositories
//! to offer, and whether wizard events are logged.

use crate::error::Result;
use crate::model::Subcommand;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Config file path relative to the base directory.
pub const CONFIG_FILE_PATH: &str = ".stash-wizard/config.yaml";

/// Persistent wizard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WizardConfig {
    /// Confirmation keys to skip, e.g. `stash-apply:command`.
    ///
    /// `stash-drop:command` is accepted but has no effect: dropping a stash
    /// always asks.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skip_confirmations: Vec<String>,

    /// Additional repositories to offer besides the current one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub repositories: Vec<PathBuf>,

    /// Append every prompt, response and outcome to the event log.
    #[serde(default)]
    pub debug_logging: bool,
}

impl WizardConfig {
    /// Load config from a specific base directory, returning None if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(base_dir: &Path) -> Result<Option<Self>> {
        let config_path = Self::config_path(base_dir);
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(Some(config))
    }

    /// Load config, falling back to defaults when there is no file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(base_dir: &Path) -> Result<Self> {
        Ok(Self::load_from(base_dir)?.unwrap_or_default())
    }

    /// Save config to a specific base directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, base_dir: &Path) -> Result<()> {
        let config_path = Self::config_path(base_dir);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_yaml::to_string(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Get the config file path for a base directory.
    pub fn config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE_PATH)
    }

    /// Remember that confirmation for `subcommand` should be skipped.
    ///
    /// Returns whether the list changed.
    pub fn skip_confirmation(&mut self, subcommand: Subcommand) -> bool {
        let key = subcommand.confirm_key();
        if self.skip_confirmations.contains(&key) {
            return false;
        }
        self.skip_confirmations.push(key);
        true
    }

    /// The preferences the engine consumes.
    #[must_use]
    pub fn preferences(&self) -> Preferences {
        Preferences { skip_confirmations: self.skip_confirmations.iter().cloned().collect() }
    }
}

/// Remembered user preferences, as seen by the wizard engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    skip_confirmations: HashSet<String>,
}

impl Preferences {
    /// Preferences that skip confirmation for the given subcommands.
    pub fn skipping(subcommands: impl IntoIterator<Item = Subcommand>) -> Self {
        Self {
            skip_confirmations: subcommands.into_iter().map(Subcommand::confirm_key).collect(),
        }
    }

    /// Whether the user asked not to confirm `subcommand`.
    #[must_use]
    pub fn skips(&self, subcommand: Subcommand) -> bool {
        self.skip_confirmations.contains(&subcommand.confirm_key())
    }
}

//! # `stash_wizard`
//!
//! An interactive, multi-step wizard for git stash operations.
//!
//! The [`wizard`] engine yields one [`wizard::Step`] at a time and never
//! touches the repository until a chain has collected everything its terminal
//! operation needs. Version control work goes through
//! [`traits::StashProvider`]; [`git::GitStashProvider`] implements it with the
//! git command line, and [`terminal::TerminalPresenter`] asks the questions.

#[cfg(feature = "cli")]
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod paths;
pub mod terminal;
pub mod testing;
pub mod traits;
pub mod wizard;
pub mod wizard_logging;

pub use error::{Error, Result};
pub use wizard::{run, Invocation, Outcome, Wizard, Yield};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

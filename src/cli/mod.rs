//! Command-line interface for stash-wizard.
//!
//! Everything given on the command line becomes part of the wizard's
//! [`Invocation`](crate::wizard::Invocation); the wizard asks for whatever is
//! still missing.

mod run;


pub use run::{run, run_with_runner, CliOutput};

use crate::model::Subcommand;
use clap::Parser;
use std::path::PathBuf;

/// Interactive git stash wizard.
///
/// Run without arguments to be asked for everything. Supplying the
/// subcommand, repository and stash up front skips those questions:
///   stash-wizard apply --repo . --stash 1
///   stash-wizard push -m "half-done parser" -- src/parser.rs
#[derive(Parser, Debug)]
#[command(name = "stash-wizard")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Stash command: apply, drop, list, pop or push.
    #[arg(value_parser = parse_subcommand)]
    pub subcommand: Option<Subcommand>,

    /// Repository to operate on. May be repeated to offer several; the first
    /// one is pre-selected.
    #[arg(long = "repo", value_name = "PATH")]
    pub repos: Vec<PathBuf>,

    /// Stash to operate on: `stash@{N}`, `N` or a SHA prefix.
    #[arg(long, value_name = "REF")]
    pub stash: Option<String>,

    /// Message for a new stash. An empty message is allowed.
    #[arg(short, long)]
    pub message: Option<String>,

    /// Push: include untracked files.
    #[arg(short = 'u', long)]
    pub include_untracked: bool,

    /// Push: keep staged changes in the index.
    #[arg(short = 'k', long)]
    pub keep_index: bool,

    /// Always ask for confirmation.
    #[arg(long, overrides_with = "no_confirm")]
    pub confirm: bool,

    /// Skip confirmation for apply, pop and push. Dropping a stash always asks.
    #[arg(long, overrides_with = "confirm")]
    pub no_confirm: bool,

    /// With `--no-confirm`, remember the choice for this subcommand.
    #[arg(long, requires = "no_confirm")]
    pub remember: bool,

    /// Only stash these paths (push).
    #[arg(last = true)]
    pub paths: Vec<PathBuf>,
}

impl Cli {
    /// The confirmation override this invocation asks for.
    #[must_use]
    pub const fn confirm_override(&self) -> Option<bool> {
        match (self.confirm, self.no_confirm) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

fn parse_subcommand(value: &str) -> Result<Subcommand, String> {
    Subcommand::parse(value).ok_or_else(|| {
        let names: Vec<&str> = Subcommand::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown stash command '{value}' (expected one of: {})", names.join(", "))
    })
}

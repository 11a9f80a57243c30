//! Running one wizard invocation from parsed arguments.

use super::Cli;
use crate::command::RealCommandRunner;
use crate::config::WizardConfig;
use crate::error::{Error, Result};
use crate::git::{toplevel, GitStashProvider};
use crate::model::PushFlag;
use crate::traits::{CommandRunner, Presenter, StashProvider};
use crate::wizard::{self, Invocation, Outcome, Severity, Terminal, Wizard};
use crate::wizard_logging::EventLog;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run the wizard against the real git in `cwd`.
pub fn run(cli: Cli, cwd: &Path, presenter: &mut dyn Presenter) -> CliOutput {
    run_with_runner(cli, cwd, RealCommandRunner::new(), presenter)
}

/// Run the wizard with an explicit command runner.
pub fn run_with_runner<R: CommandRunner>(
    cli: Cli,
    cwd: &Path,
    runner: R,
    presenter: &mut dyn Presenter,
) -> CliOutput {
    match drive(cli, cwd, runner, presenter) {
        Ok(outcome) => render(&outcome),
        Err(e) => CliOutput {
            exit_code: ExitCode::FAILURE,
            stdout: vec![],
            stderr: vec![format!("Error: {e}")],
        },
    }
}

fn drive<R: CommandRunner>(
    cli: Cli,
    cwd: &Path,
    runner: R,
    presenter: &mut dyn Presenter,
) -> Result<Outcome> {
    let base = toplevel(&runner, cwd).unwrap_or_else(|| cwd.to_path_buf());
    let mut config = WizardConfig::load_or_default(&base)?;

    let preset_repo = match cli.repos.first() {
        Some(path) => Some(toplevel(&runner, &cwd.join(path)).ok_or_else(|| {
            Error::Git(format!("{} is not inside a git repository", path.display()))
        })?),
        None => None,
    };

    let mut candidates: Vec<PathBuf> = config.repositories.iter().map(|p| base.join(p)).collect();
    candidates.extend(cli.repos.iter().map(|p| cwd.join(p)));
    let provider = GitStashProvider::new(runner, cwd, candidates);

    // A stash reference only means something within one repository, so
    // naming one also fixes the repository it was resolved in.
    let (repository, changeset) = match &cli.stash {
        Some(reference) => {
            let repo = preset_repo
                .or_else(|| provider.active_context().map(|r| r.path))
                .ok_or(Error::NoRepositories)?;
            let changeset = provider.find_changeset(&repo, reference)?;
            (Some(repo), Some(changeset))
        }
        None => (preset_repo, None),
    };

    let mut flags = Vec::new();
    if cli.include_untracked {
        flags.push(PushFlag::IncludeUntracked);
    }
    if cli.keep_index {
        flags.push(PushFlag::KeepIndex);
    }

    let invocation = Invocation {
        subcommand: cli.subcommand,
        repository,
        changeset,
        message: cli.message.clone(),
        paths: cli.paths.clone(),
        flags,
        confirm: cli.confirm_override(),
    };

    let events = EventLog::for_repository(&base, &config);
    let mut wizard =
        Wizard::new(provider, invocation, config.preferences())?.with_event_log(events);
    let outcome = wizard::run(&mut wizard, presenter)?;

    // Remember the preference only once the operation completed.
    if cli.remember && matches!(outcome, Outcome::Completed { .. }) {
        if let Some(sub) = cli.subcommand {
            if config.skip_confirmation(sub) {
                config.save_to(&base)?;
            }
        }
    }
    Ok(outcome)
}

fn render(outcome: &Outcome) -> CliOutput {
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();

    match outcome {
        Outcome::Completed { terminal, output } => {
            stdout.extend(output.lines().map(str::trim_end).filter(|l| !l.is_empty()).map(String::from));
            stderr.push(describe(terminal));
        }
        Outcome::Reported(report) => match report.severity {
            Severity::Info => stdout.push(report.message.clone()),
            Severity::Warning => stderr.push(format!("Warning: {}", report.message)),
            Severity::Failure => {
                stderr.push(format!("Error: {}", report.message));
                stderr.extend(report.detail.lines().map(|l| format!("  {l}")));
            }
        },
        Outcome::Back | Outcome::Cancelled => stderr.push("Cancelled".to_string()),
    }

    let exit_code = if outcome.is_success() { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    CliOutput { exit_code, stdout, stderr }
}

fn describe(terminal: &Terminal) -> String {
    match terminal {
        Terminal::Apply { changeset, remove: false, .. } => format!("Applied {}", changeset.summary()),
        Terminal::Apply { changeset, remove: true, .. } => format!("Popped {}", changeset.summary()),
        Terminal::Drop { changeset, .. } => format!("Dropped {}", changeset.summary()),
        Terminal::Push { message, .. } if message.is_empty() => "Stashed changes".to_string(),
        Terminal::Push { message, .. } => format!("Stashed changes: {message}"),
    }
}

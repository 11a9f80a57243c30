//! CLI binary for `stash_wizard`.
//!
//! This binary is a thin wrapper: prompts go to stderr, the result of the
//! stash operation to stdout.

use std::env;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use stash_wizard::cli::Cli;
use stash_wizard::terminal::TerminalPresenter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let cwd = match env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: cannot determine the current directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut presenter = TerminalPresenter::new(io::stdin().lock(), io::stderr());
    let output = stash_wizard::cli::run(cli, &cwd, &mut presenter);

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}

//! A [`StashProvider`] backed by the git command line.

use super::{git_in, toplevel};
use crate::error::{Error, Result};
use crate::model::{Changeset, PushFlag, Repository, RevealOptions, RevealTarget, StashFlags};
use crate::traits::{CommandRunner, StashProvider};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Field separator used in the `stash list` format (ASCII unit separator).
const SEP: char = '\x1f';

const LIST_FORMAT: &str = "--format=%gd%x1f%H%x1f%ct%x1f%gs";

/// Stash operations through `git -C <repo> stash ...`.
#[derive(Debug)]
pub struct GitStashProvider<R> {
    runner: R,
    candidates: Vec<PathBuf>,
    current_dir: PathBuf,
}

impl<R: CommandRunner> GitStashProvider<R> {
    /// Offer the repository containing `current_dir` plus every candidate path
    /// that is inside a git working tree.
    pub fn new(runner: R, current_dir: impl Into<PathBuf>, candidates: Vec<PathBuf>) -> Self {
        Self { runner, candidates, current_dir: current_dir.into() }
    }

    /// The command runner.
    pub const fn runner(&self) -> &R {
        &self.runner
    }

    /// Resolve a user-supplied stash reference (`stash@{1}`, `1` or a SHA prefix).
    ///
    /// # Errors
    ///
    /// Returns an error if the listing fails or nothing matches.
    pub fn find_changeset(&self, repo: &Path, reference: &str) -> Result<Changeset> {
        let wanted = if reference.chars().all(|c| c.is_ascii_digit()) {
            format!("stash@{{{reference}}}")
        } else {
            reference.to_string()
        };
        self.list_changesets(repo)?
            .unwrap_or_default()
            .into_iter()
            .find(|c| c.ref_name == wanted || (wanted.len() >= 4 && c.sha.starts_with(&wanted)))
            .ok_or_else(|| Error::Git(format!("no stash matches '{reference}'")))
    }

    fn git(&self, repo: &Path, args: &[&str]) -> Result<String> {
        git_in(&self.runner, repo, args)
    }
}

impl<R: CommandRunner> StashProvider for GitStashProvider<R> {
    fn list_contexts(&self) -> Result<Vec<Repository>> {
        let mut repos: Vec<Repository> = Vec::new();
        let dirs = std::iter::once(&self.current_dir).chain(self.candidates.iter());
        for dir in dirs {
            if let Some(root) = toplevel(&self.runner, dir) {
                if !repos.iter().any(|r| r.path == root) {
                    repos.push(Repository::from_path(root));
                }
            }
        }
        Ok(repos)
    }

    fn active_context(&self) -> Option<Repository> {
        toplevel(&self.runner, &self.current_dir).map(Repository::from_path)
    }

    fn list_changesets(&self, repo: &Path) -> Result<Option<Vec<Changeset>>> {
        let out = self.git(repo, &["stash", "list", LIST_FORMAT])?;
        let entries = parse_stash_list(&out, repo)?;
        Ok(if entries.is_empty() { None } else { Some(entries) })
    }

    fn changeset_files(&self, repo: &Path, changeset: &Changeset) -> Result<Vec<String>> {
        let out = self.git(repo, &["stash", "show", "--name-only", &changeset.ref_name])?;
        Ok(out.lines().map(str::trim).filter(|l| !l.is_empty()).map(String::from).collect())
    }

    fn apply_changeset(&self, repo: &Path, changeset: &Changeset, remove: bool) -> Result<String> {
        let verb = if remove { "pop" } else { "apply" };
        self.git(repo, &["stash", verb, &changeset.ref_name])
    }

    fn delete_changeset(&self, repo: &Path, changeset: &Changeset) -> Result<String> {
        self.git(repo, &["stash", "drop", &changeset.ref_name])
    }

    fn save_changeset(
        &self,
        repo: &Path,
        message: &str,
        paths: &[PathBuf],
        flags: StashFlags,
    ) -> Result<String> {
        let path_args: Vec<String> = paths.iter().map(|p| p.to_string_lossy().into_owned()).collect();

        let mut args = vec!["stash", "push"];
        for (enabled, flag) in [
            (flags.include_untracked, PushFlag::IncludeUntracked),
            (flags.keep_index, PushFlag::KeepIndex),
        ] {
            if enabled {
                args.push(flag.as_arg());
            }
        }
        if !message.is_empty() {
            args.extend(["-m", message]);
        }
        if !path_args.is_empty() {
            args.push("--");
            args.extend(path_args.iter().map(String::as_str));
        }

        let out = self.git(repo, &args)?;
        // git exits 0 when there is nothing to stash.
        if out.contains("No local changes to save") {
            return Err(Error::Stash {
                reason: Some(crate::model::StashFailure::NothingToSave),
                message: out.trim().to_string(),
            });
        }
        Ok(out)
    }

    fn reveal(&self, target: &RevealTarget, options: RevealOptions) -> Result<Option<String>> {
        let text = match target {
            RevealTarget::Changeset(changeset) => {
                let mut args = vec!["stash", "show"];
                args.push(if options.expand { "--stat" } else { "--shortstat" });
                args.push(&changeset.ref_name);
                let stat = self.git(&changeset.repo_path, &args)?;
                format!("{}\n{}", changeset.summary(), stat.trim_end())
            }
            RevealTarget::Repository(repo) => self
                .list_changesets(repo)?
                .unwrap_or_default()
                .iter()
                .map(Changeset::summary)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(Some(text))
    }
}

/// Parse `git stash list --format=%gd%x1f%H%x1f%ct%x1f%gs` output.
///
/// # Errors
///
/// Returns an error if a line does not have the expected fields.
pub fn parse_stash_list(output: &str, repo: &Path) -> Result<Vec<Changeset>> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let fields: Vec<&str> = line.splitn(4, SEP).collect();
            let [ref_name, sha, timestamp, subject] = fields.as_slice() else {
                return Err(Error::Git(format!("unexpected stash list line: {line}")));
            };
            let secs: i64 = timestamp
                .trim()
                .parse()
                .map_err(|_| Error::Git(format!("bad stash timestamp: {timestamp}")))?;
            let date = DateTime::<Utc>::from_timestamp(secs, 0)
                .ok_or_else(|| Error::Git(format!("bad stash timestamp: {timestamp}")))?;
            let (branch, message) = split_subject(subject);

            Ok(Changeset {
                ref_name: (*ref_name).to_string(),
                sha: (*sha).to_string(),
                message,
                branch,
                date,
                repo_path: repo.to_path_buf(),
            })
        })
        .collect()
}

/// Split "WIP on main: abc123 subject", "On main: message" or
/// "index on main: ..." into branch and message.
fn split_subject(subject: &str) -> (Option<String>, String) {
    for prefix in ["WIP on ", "On ", "index on "] {
        if let Some(rest) = subject.strip_prefix(prefix) {
            if let Some((branch, message)) = rest.split_once(": ") {
                return (Some(branch.to_string()), message.to_string());
            }
        }
    }
    (None, subject.to_string())
}

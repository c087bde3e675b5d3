//! Version-control preflight for the run root.
//!
//! The engine diffs staged files against the last commit, so the run root
//! should be a work tree with everything committed before the engine
//! starts. None of this may fail the run: on a degraded preflight the
//! engine either copes or reports its own error.

use std::path::Path;
use std::process::Command;

/// Identity for commits created by the runner.
const COMMIT_AUTHOR_NAME: &str = "Apify Actor";
const COMMIT_AUTHOR_EMAIL: &str = "actor@apify.com";
const COMMIT_MESSAGE: &str = "Prepare translation context";

/// Outcome of the preflight. Degradation is a warning, never an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Preflight {
    /// The run root is a work tree and the staged files are committed.
    Ready,
    /// A step failed; the run continues anyway.
    Degraded(String),
}

impl Preflight {
    pub fn warning(&self) -> Option<&str> {
        match self {
            Preflight::Ready => None,
            Preflight::Degraded(reason) => Some(reason),
        }
    }
}

/// Whether a git binary is reachable on PATH.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Whether `dir` is already inside a git work tree.
pub fn is_work_tree(dir: &Path) -> bool {
    git_in(dir, &["rev-parse", "--is-inside-work-tree"])
        .map(|stdout| stdout.trim() == "true")
        .unwrap_or(false)
}

/// Initialize a repository at `dir`. Re-running on an existing repository
/// succeeds.
pub fn init_repository(dir: &Path) -> Result<(), String> {
    git_in(dir, &["init"]).map(|_| ())
}

/// Ensure a committed work tree exists at `dir`.
///
/// Initializes a repository when needed, sets a repository-local identity,
/// stages everything under `dir` and commits. A commit with nothing to
/// commit fails on git's side and is deliberately swallowed, which makes
/// the whole preflight idempotent.
pub fn preflight(dir: &Path) -> Preflight {
    if !git_available() {
        return Preflight::Degraded(
            "git is not available on PATH; the engine may fail to diff staged files".to_string(),
        );
    }

    if !is_work_tree(dir) {
        if let Err(err) = init_repository(dir) {
            return Preflight::Degraded(format!("git init failed: {err}"));
        }
    }

    // Local identity only. Commits fail on hosts with no global identity,
    // and a global write would leak out of the run root.
    for (key, value) in [
        ("user.email", COMMIT_AUTHOR_EMAIL),
        ("user.name", COMMIT_AUTHOR_NAME),
    ] {
        if let Err(err) = git_in(dir, &["config", key, value]) {
            return Preflight::Degraded(format!("git config {key} failed: {err}"));
        }
    }

    if let Err(err) = git_in(dir, &["add", "."]) {
        return Preflight::Degraded(format!("git add failed: {err}"));
    }

    let _ = git_in(dir, &["commit", "-m", COMMIT_MESSAGE]);

    Preflight::Ready
}

/// Run one git subcommand in `dir`, returning stdout on success and stderr
/// as the error otherwise.
fn git_in(dir: &Path, args: &[&str]) -> Result<String, String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|err| err.to_string())?;

    if output.status.success() {
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    } else {
        Err(String::from_utf8_lossy(&output.stderr).trim().to_string())
    }
}

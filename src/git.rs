//! Git CLI wrapper for the staged-file query.
//!
//! Shells out to `git` via `std::process::Command`. This is the thin
//! boundary to the version-control collaborator; the scan core only ever
//! sees a plain list of paths.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Errors from the git wrapper.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {command} failed (exit {status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },
}

/// Run `git diff --cached --name-only` and return the staged paths,
/// relative to the repo root, in git's order.
///
/// `--diff-filter=ACM` keeps added, copied, and modified entries;
/// deletions have nothing on disk to scan. `-z` gives NUL-separated
/// output so unusual filenames survive.
pub fn staged_files(repo_root: &Path) -> Result<Vec<PathBuf>, GitError> {
    let output = Command::new("git")
        .args(["diff", "--cached", "--name-only", "--diff-filter=ACM", "-z"])
        .current_dir(repo_root)
        .output()?;

    if !output.status.success() {
        return Err(GitError::Command {
            command: "diff --cached".to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout)
        .split('\0')
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Find the root of the git repository containing `start_dir`.
pub fn find_repo_root(start_dir: &Path) -> Result<PathBuf, GitError> {
    let output = Command::new("git")
        .args(["rev-parse", "--show-toplevel"])
        .current_dir(start_dir)
        .output()?;

    if !output.status.success() {
        return Err(GitError::Command {
            command: "rev-parse --show-toplevel".to_string(),
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(PathBuf::from(
        String::from_utf8_lossy(&output.stdout).trim(),
    ))
}

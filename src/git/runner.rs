//! Git command runner
//!
//! One `git` process per call, run in the project root. Failures carry the
//! subcommand name and git's stderr.

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::{Command, Output};

/// Run a git command and return the raw Output.
pub fn run_git(args: &[&str], repo_root: &Path) -> Result<Output> {
    tracing::debug!(args = ?args, root = %repo_root.display(), "running git");
    Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .with_context(|| format!("Failed to execute: git {}", args.join(" ")))
}

/// Run a git command, check for success, and return stdout trimmed.
pub fn run_git_checked(args: &[&str], repo_root: &Path) -> Result<String> {
    let output = run_git(args, repo_root)?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let cmd = args.first().unwrap_or(&"");
        bail!("git {cmd} failed: {}", stderr.trim());
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

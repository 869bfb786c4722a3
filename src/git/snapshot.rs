//! Working-tree snapshots
//!
//! A snapshot is the commit HEAD points at once any pending changes have been
//! committed. Resuming a snapshot is a detached checkout of that commit.

use std::path::{Path, PathBuf};
use thiserror::Error;

use super::runner::{run_git, run_git_checked};

/// Outcome of asking git whether the project root is inside a work tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoCheck {
    Repository,
    NotRepository,
    /// git could not be run at all.
    CheckFailed(String),
}

/// A failed git operation, tagged with the operation that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{operation} failed: {message}")]
pub struct SnapshotError {
    pub operation: &'static str,
    pub message: String,
}

impl SnapshotError {
    fn wrap(operation: &'static str, err: anyhow::Error) -> Self {
        Self {
            operation,
            message: format!("{err:#}"),
        }
    }
}

pub trait Snapshots {
    fn check_repository(&self) -> RepoCheck;

    fn is_clean(&self) -> Result<bool, SnapshotError>;

    /// Stage everything and commit when the tree is dirty. Returns whether a
    /// commit was made.
    fn commit_all_if_dirty(&self, message: &str) -> Result<bool, SnapshotError>;

    fn head_commit_hash(&self) -> Result<String, SnapshotError>;

    /// Check out `commit_hash`. Callers verify cleanliness first.
    fn checkout(&self, commit_hash: &str) -> Result<(), SnapshotError>;
}

#[derive(Debug, Clone)]
pub struct GitSnapshots {
    repo_root: PathBuf,
}

impl GitSnapshots {
    pub fn new(repo_root: impl Into<PathBuf>) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    pub fn repo_root(&self) -> &Path {
        &self.repo_root
    }
}

/// Porcelain status is clean only when git prints nothing. Untracked files
/// count as dirty because `add -A` would sweep them into the snapshot.
pub fn porcelain_is_clean(status: &str) -> bool {
    status.lines().all(|line| line.trim().is_empty())
}

impl Snapshots for GitSnapshots {
    fn check_repository(&self) -> RepoCheck {
        let output = match run_git(&["rev-parse", "--is-inside-work-tree"], &self.repo_root) {
            Ok(output) => output,
            Err(e) => return RepoCheck::CheckFailed(format!("{e:#}")),
        };

        if output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true" {
            RepoCheck::Repository
        } else {
            RepoCheck::NotRepository
        }
    }

    fn is_clean(&self) -> Result<bool, SnapshotError> {
        let status = run_git_checked(&["status", "--porcelain"], &self.repo_root)
            .map_err(|e| SnapshotError::wrap("status", e))?;
        Ok(porcelain_is_clean(&status))
    }

    fn commit_all_if_dirty(&self, message: &str) -> Result<bool, SnapshotError> {
        if self.is_clean()? {
            tracing::debug!("working tree clean, no snapshot commit needed");
            return Ok(false);
        }

        run_git_checked(&["add", "-A"], &self.repo_root)
            .map_err(|e| SnapshotError::wrap("add", e))?;
        run_git_checked(&["commit", "--no-verify", "-m", message], &self.repo_root)
            .map_err(|e| SnapshotError::wrap("commit", e))?;
        tracing::info!(message, "created snapshot commit");
        Ok(true)
    }

    fn head_commit_hash(&self) -> Result<String, SnapshotError> {
        run_git_checked(&["rev-parse", "HEAD"], &self.repo_root)
            .map_err(|e| SnapshotError::wrap("rev-parse", e))
    }

    fn checkout(&self, commit_hash: &str) -> Result<(), SnapshotError> {
        run_git_checked(&["checkout", commit_hash], &self.repo_root)
            .map_err(|e| SnapshotError::wrap("checkout", e))?;
        Ok(())
    }
}

use thiserror::Error;

use crate::git::SnapshotError;
use crate::models::AuthType;

/// Every way a checkpoint command can fail. The `Display` form is the complete
/// message shown to the user, underlying causes included.
#[derive(Debug, Error)]
pub enum CheckpointError {
    #[error("Missing tag. Usage: {usage}")]
    MissingTag { usage: &'static str },

    #[error("Not inside a git repository: {root}")]
    NotARepository { root: String },

    #[error("Could not check for a git repository: {reason}")]
    RepositoryCheckFailed { reason: String },

    #[error(
        "Working tree has uncommitted changes. Commit or stash them before resuming a checkpoint."
    )]
    DirtyWorkingTree,

    #[error("Failed to snapshot working tree: {0}")]
    Snapshot(SnapshotError),

    #[error("Failed to check out commit {hash}: {cause}")]
    Checkout { hash: String, cause: SnapshotError },

    #[error("Failed to access tag ledger: {0:#}")]
    LedgerIo(anyhow::Error),

    #[error("Checkpoint store error: {0:#}")]
    Store(anyhow::Error),

    #[error("Failed to read live session: {0:#}")]
    Session(anyhow::Error),

    #[error("Tag '{tag}' is not associated with a snapshot.")]
    NotAssociated { tag: String },

    #[error("No git commit associated with tag '{tag}'.")]
    NoCommitForTag { tag: String },

    #[error("No checkpoint found with tag: {tag}")]
    CheckpointNotFound { tag: String },

    #[error(
        "Cannot resume checkpoint '{tag}': it was saved with auth type '{stored}' but the current auth type is '{}'.",
        .current.as_ref().map(AuthType::as_str).unwrap_or("none")
    )]
    AuthMismatch {
        tag: String,
        stored: AuthType,
        current: Option<AuthType>,
    },
}

//! Git operations for working-tree snapshots

pub mod runner;
pub mod snapshot;

pub use snapshot::{porcelain_is_clean, GitSnapshots, RepoCheck, SnapshotError, Snapshots};

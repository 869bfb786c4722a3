//! Cross-store consistency report
//!
//! Save writes the checkpoint record before the ledger entry and delete
//! removes the ledger entry before the record, so an interrupted command can
//! leave either side orphaned. Nothing here repairs anything.

use std::collections::BTreeSet;

use crate::fs::{CheckpointStore, TagLedger};
use crate::models::LedgerEntry;

use super::CheckpointError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Ledger entries with no checkpoint record (a delete stopped between
    /// steps, or the record was removed externally).
    pub orphaned_ledger_entries: Vec<LedgerEntry>,
    /// Checkpoint records with no ledger entry (a save stopped before the
    /// ledger write, or a delete removed only the ledger entry).
    pub orphaned_checkpoints: Vec<String>,
}

impl ReconcileReport {
    pub fn is_consistent(&self) -> bool {
        self.orphaned_ledger_entries.is_empty() && self.orphaned_checkpoints.is_empty()
    }
}

pub fn reconcile<C: CheckpointStore>(
    ledger: &TagLedger,
    store: &C,
) -> Result<ReconcileReport, CheckpointError> {
    let entries = ledger.load().map_err(CheckpointError::LedgerIo)?;
    let stored: BTreeSet<String> = store
        .list_tags()
        .map_err(CheckpointError::Store)?
        .into_iter()
        .collect();

    let ledger_tags: BTreeSet<&str> = entries.iter().map(|e| e.tag.as_str()).collect();

    let orphaned_checkpoints = stored
        .iter()
        .filter(|tag| !ledger_tags.contains(tag.as_str()))
        .cloned()
        .collect();
    let orphaned_ledger_entries = entries
        .into_iter()
        .filter(|entry| !stored.contains(&entry.tag))
        .collect();

    Ok(ReconcileReport {
        orphaned_ledger_entries,
        orphaned_checkpoints,
    })
}

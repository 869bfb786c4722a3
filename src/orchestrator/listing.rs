//! Saved-checkpoint enumeration for list and completion
//!
//! Advisory only: callers that display results use `chat_details_or_empty`,
//! which turns any failure into an empty list.

use anyhow::Result;

use crate::fs::{CheckpointStore, TagLedger};
use crate::models::ChatDetail;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    OldestFirst,
    NewestFirst,
}

/// Join ledger entries with checkpoint modification times. Names are the
/// tags exactly as stored, so they can be fed back to resume or delete.
/// Entries whose checkpoint record is missing are skipped.
pub fn chat_details<C: CheckpointStore>(
    ledger: &TagLedger,
    store: &C,
    order: Order,
) -> Result<Vec<ChatDetail>> {
    let mut details = Vec::new();
    for entry in ledger.load()? {
        if let Some(mtime) = store.modified_time(&entry.tag)? {
            details.push(ChatDetail {
                name: entry.tag,
                mtime,
            });
        }
    }

    match order {
        Order::OldestFirst => details.sort_by(|a, b| a.mtime.cmp(&b.mtime)),
        Order::NewestFirst => details.sort_by(|a, b| b.mtime.cmp(&a.mtime)),
    }
    Ok(details)
}

pub fn chat_details_or_empty<C: CheckpointStore>(
    ledger: &TagLedger,
    store: &C,
    order: Order,
) -> Vec<ChatDetail> {
    chat_details(ledger, store, order).unwrap_or_else(|e| {
        tracing::warn!(error = %format!("{e:#}"), "could not enumerate checkpoints");
        Vec::new()
    })
}

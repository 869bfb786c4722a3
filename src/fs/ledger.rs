//! Tag ledger I/O
//!
//! The ledger lives at `.snaptag/tag-commits.json` and is a JSON array of
//! `{ "tag", "commitHash" }` objects. Every operation reads the whole file and
//! writes the whole file back; nothing is cached between calls.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::fs::locking::{read_if_exists, write_replacing};
use crate::models::{LedgerEntry, LedgerRemoval};

#[derive(Debug, Clone)]
pub struct TagLedger {
    path: PathBuf,
}

impl TagLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load every entry. A missing file is an empty ledger; an unreadable or
    /// malformed file is an error.
    pub fn load(&self) -> Result<Vec<LedgerEntry>> {
        let Some(content) = read_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse ledger file: {}", self.path.display()))
    }

    pub fn find(&self, tag: &str) -> Result<Option<LedgerEntry>> {
        Ok(self.load()?.into_iter().find(|entry| entry.tag == tag))
    }

    /// Bind `tag` to `commit_hash`, replacing an existing binding in place.
    pub fn upsert(&self, tag: &str, commit_hash: &str) -> Result<()> {
        let mut entries = self.load()?;

        match entries.iter_mut().find(|entry| entry.tag == tag) {
            Some(existing) => existing.commit_hash = commit_hash.to_string(),
            None => entries.push(LedgerEntry::new(tag, commit_hash)),
        }

        self.store(&entries)
    }

    /// Remove the binding for `tag`. The file is only rewritten when an entry
    /// was actually removed.
    pub fn remove(&self, tag: &str) -> Result<LedgerRemoval> {
        let mut entries = self.load()?;

        let Some(position) = entries.iter().position(|entry| entry.tag == tag) else {
            return Ok(LedgerRemoval::NotFound);
        };

        let removed = entries.remove(position);
        self.store(&entries)?;
        Ok(LedgerRemoval::Removed(removed))
    }

    fn store(&self, entries: &[LedgerEntry]) -> Result<()> {
        let json =
            serde_json::to_string_pretty(entries).context("Failed to serialize ledger to JSON")?;
        write_replacing(&self.path, &json)
    }
}

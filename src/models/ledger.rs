use serde::{Deserialize, Serialize};

/// One tag → commit binding in the ledger file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub tag: String,
    #[serde(rename = "commitHash")]
    pub commit_hash: String,
}

impl LedgerEntry {
    pub fn new(tag: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            commit_hash: commit_hash.into(),
        }
    }
}

/// Result of removing a tag from the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerRemoval {
    Removed(LedgerEntry),
    NotFound,
}

//! The live conversation a checkpoint is taken from and restored into.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::fs::locking::{read_if_exists, write_replacing};
use crate::models::{AuthType, ConversationTurn};

pub trait LiveSession {
    /// Full history of the active conversation, hidden context included.
    fn history(&self) -> Result<Vec<ConversationTurn>>;

    /// Auth context the session currently runs under.
    fn auth_type(&self) -> Option<AuthType>;

    /// Replace the active history with a restored one.
    fn replace_history(&self, history: &[ConversationTurn]) -> Result<()>;
}

/// A session persisted as a JSON array of turns. A missing file is an empty
/// conversation.
#[derive(Debug, Clone)]
pub struct FileSession {
    path: PathBuf,
    auth_type: Option<AuthType>,
}

impl FileSession {
    pub fn new(path: impl Into<PathBuf>, auth_type: Option<AuthType>) -> Self {
        Self {
            path: path.into(),
            auth_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LiveSession for FileSession {
    fn history(&self) -> Result<Vec<ConversationTurn>> {
        let Some(content) = read_if_exists(&self.path)? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse session file: {}", self.path.display()))
    }

    fn auth_type(&self) -> Option<AuthType> {
        self.auth_type.clone()
    }

    fn replace_history(&self, history: &[ConversationTurn]) -> Result<()> {
        let json = serde_json::to_string_pretty(history)
            .context("Failed to serialize session history")?;
        write_replacing(&self.path, &json)
    }
}

//! Checkpoint record persistence
//!
//! `CheckpointStore` is the seam the orchestrator talks to. `FileCheckpointStore`
//! keeps one JSON file per tag at `.snaptag/checkpoints/checkpoint-{tag}.json`,
//! with the tag percent-encoded.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::fs::locking::{read_if_exists, write_replacing};
use crate::fs::tag_names::{checkpoint_file_name, tag_from_file_name};
use crate::models::CheckpointRecord;

pub trait CheckpointStore {
    /// Prepare backing storage. Safe to call repeatedly.
    fn initialize(&self) -> Result<()>;

    fn checkpoint_exists(&self, tag: &str) -> Result<bool>;

    fn save_checkpoint(&self, record: &CheckpointRecord, tag: &str) -> Result<()>;

    /// Load the record for `tag`. `Ok(None)` when nothing was saved under it.
    fn load_checkpoint(&self, tag: &str) -> Result<Option<CheckpointRecord>>;

    /// Delete the record for `tag`, returning whether one existed.
    fn delete_checkpoint(&self, tag: &str) -> Result<bool>;

    /// Last modification time of the record for `tag`, if it exists.
    fn modified_time(&self, tag: &str) -> Result<Option<DateTime<Utc>>>;

    /// Every tag with a stored record, in no particular order.
    fn list_tags(&self) -> Result<Vec<String>>;
}

#[derive(Debug, Clone)]
pub struct FileCheckpointStore {
    dir: PathBuf,
}

impl FileCheckpointStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn checkpoint_path(&self, tag: &str) -> PathBuf {
        self.dir.join(checkpoint_file_name(tag))
    }
}

impl CheckpointStore for FileCheckpointStore {
    fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create checkpoints directory: {}", self.dir.display())
        })
    }

    fn checkpoint_exists(&self, tag: &str) -> Result<bool> {
        let path = self.checkpoint_path(tag);
        path.try_exists()
            .with_context(|| format!("Failed to check checkpoint: {}", path.display()))
    }

    fn save_checkpoint(&self, record: &CheckpointRecord, tag: &str) -> Result<()> {
        self.initialize()?;
        let path = self.checkpoint_path(tag);
        let json = serde_json::to_string_pretty(record)
            .context("Failed to serialize checkpoint to JSON")?;
        write_replacing(&path, &json)
    }

    fn load_checkpoint(&self, tag: &str) -> Result<Option<CheckpointRecord>> {
        let path = self.checkpoint_path(tag);
        let Some(content) = read_if_exists(&path)? else {
            return Ok(None);
        };

        let record = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse checkpoint file: {}", path.display()))?;
        Ok(Some(record))
    }

    fn delete_checkpoint(&self, tag: &str) -> Result<bool> {
        let path = self.checkpoint_path(tag);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to delete checkpoint: {}", path.display())),
        }
    }

    fn modified_time(&self, tag: &str) -> Result<Option<DateTime<Utc>>> {
        let path = self.checkpoint_path(tag);
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to stat checkpoint: {}", path.display()))
            }
        };
        let modified = metadata
            .modified()
            .with_context(|| format!("Failed to read mtime: {}", path.display()))?;
        Ok(Some(DateTime::<Utc>::from(modified)))
    }

    fn list_tags(&self) -> Result<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).with_context(|| {
            format!("Failed to read checkpoints directory: {}", self.dir.display())
        })?;

        let mut tags = Vec::new();
        for entry in entries {
            let entry = entry?;
            if let Some(tag) = entry.file_name().to_str().and_then(tag_from_file_name) {
                tags.push(tag);
            }
        }
        tags.sort();
        Ok(tags)
    }
}

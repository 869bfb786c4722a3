//! Advisory locking for state files
//!
//! Ledger and checkpoint files are read whole and replaced whole. Readers take
//! a shared `fs2` lock and writers an exclusive one, so another snaptag process
//! never observes a half-written file. The read-modify-write cycle as a whole
//! is not locked; the last writer wins.

use anyhow::{Context, Result};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

/// Read a file under a shared lock. Returns `Ok(None)` when the file does not exist.
pub fn read_if_exists(path: &Path) -> Result<Option<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to open file: {}", path.display()))
        }
    };
    file.lock_shared()
        .with_context(|| format!("Failed to acquire shared lock: {}", path.display()))?;

    let mut content = String::new();
    (&file)
        .read_to_string(&mut content)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    Ok(Some(content))
}

/// Replace a file's contents under an exclusive lock, creating parent directories.
///
/// Sequence: open (no truncate) → lock → truncate → write → sync.
pub fn write_replacing(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    #[allow(clippy::suspicious_open_options)]
    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .with_context(|| format!("Failed to open file for writing: {}", path.display()))?;
    file.lock_exclusive()
        .with_context(|| format!("Failed to acquire exclusive lock: {}", path.display()))?;
    file.set_len(0)
        .with_context(|| format!("Failed to truncate file: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write file: {}", path.display()))?;
    file.sync_all()
        .with_context(|| format!("Failed to flush file: {}", path.display()))?;
    Ok(())
}

//! Checkpoint orchestration
//!
//! Keeps three stores in step: the checkpoint store (conversation records),
//! the git history (snapshot commits) and the tag ledger (tag → commit).
//! None of them can be updated atomically together, so every command checks
//! its preconditions first and then mutates in a fixed order:
//!
//! - save: snapshot commit → checkpoint record → ledger entry
//! - delete: ledger entry → checkpoint record
//!
//! A failure part way through is reported and left in place. `reconcile`
//! finds the orphans such failures leave behind.

mod error;
pub mod history;
pub mod listing;
mod outcome;
pub mod reconcile;

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::fs::{CheckpointStore, FileCheckpointStore, StateDir, TagLedger};
use crate::git::{GitSnapshots, RepoCheck, Snapshots};
use crate::models::constants::SNAPSHOT_COMMIT_PREFIX;
use crate::models::{ChatDetail, CheckpointRecord, LedgerRemoval};
use crate::session::{FileSession, LiveSession};

pub use error::CheckpointError;
pub use history::{has_conversation, to_display_history};
pub use outcome::{ChatCommand, CommandOutcome, ReplayInvocation};
pub use reconcile::ReconcileReport;

const SAVE_USAGE: &str = "snaptag chat save <tag>";
const RESUME_USAGE: &str = "snaptag chat resume <tag>";
const DELETE_USAGE: &str = "snaptag chat delete <tag>";

pub struct CheckpointOrchestrator<C, G, L> {
    project_root: PathBuf,
    hidden_context_turns: usize,
    state_dir: StateDir,
    ledger: TagLedger,
    store: C,
    snapshots: G,
    session: L,
}

impl CheckpointOrchestrator<FileCheckpointStore, GitSnapshots, FileSession> {
    /// Wire the file-backed stores and git for `config`. Nothing is created
    /// on disk until a save reaches its first write.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config,
            FileCheckpointStore::new(config.checkpoints_dir()),
            GitSnapshots::new(&config.project_root),
            FileSession::new(&config.session_path, config.auth_type.clone()),
        )
    }
}

impl<C, G, L> CheckpointOrchestrator<C, G, L>
where
    C: CheckpointStore,
    G: Snapshots,
    L: LiveSession,
{
    pub fn new(config: &Config, store: C, snapshots: G, session: L) -> Self {
        Self {
            project_root: config.project_root.clone(),
            hidden_context_turns: config.hidden_context_turns,
            state_dir: StateDir::new(config),
            ledger: TagLedger::new(config.ledger_path()),
            store,
            snapshots,
            session,
        }
    }

    pub fn ledger(&self) -> &TagLedger {
        &self.ledger
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    pub fn snapshots(&self) -> &G {
        &self.snapshots
    }

    pub fn session(&self) -> &L {
        &self.session
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Execute a command, as issued by the user or replayed after confirmation.
    pub fn run(&self, invocation: &ReplayInvocation) -> CommandOutcome {
        match &invocation.command {
            ChatCommand::List => CommandOutcome::Info(format_chat_list(&self.list())),
            ChatCommand::Save { tag } => self.save(tag, invocation.overwrite_confirmed),
            ChatCommand::Resume { tag } => self.resume(tag),
            ChatCommand::Delete { tag } => self.delete(tag),
        }
    }

    /// Save the live conversation under `tag` and bind it to a snapshot of the
    /// working tree. Without `overwrite_confirmed`, an existing checkpoint
    /// yields a confirmation request instead.
    pub fn save(&self, tag: &str, overwrite_confirmed: bool) -> CommandOutcome {
        self.try_save(tag, overwrite_confirmed).into()
    }

    fn try_save(
        &self,
        tag: &str,
        overwrite_confirmed: bool,
    ) -> Result<CommandOutcome, CheckpointError> {
        let tag = require_tag(tag, SAVE_USAGE)?;
        self.require_repository()?;

        if !overwrite_confirmed
            && self
                .store
                .checkpoint_exists(tag)
                .map_err(CheckpointError::Store)?
        {
            return Ok(CommandOutcome::ConfirmAction {
                prompt: format!(
                    "A checkpoint with the tag '{tag}' already exists. Do you want to overwrite it?"
                ),
                invocation: ReplayInvocation {
                    command: ChatCommand::Save {
                        tag: tag.to_string(),
                    },
                    overwrite_confirmed: true,
                },
            });
        }

        let history = self.session.history().map_err(CheckpointError::Session)?;
        if !has_conversation(&history, self.hidden_context_turns) {
            return Ok(CommandOutcome::Info(
                "No conversation found to save.".to_string(),
            ));
        }

        // Must exist before `add -A` so its `.gitignore` applies.
        self.state_dir.ensure().map_err(CheckpointError::Store)?;
        self.store.initialize().map_err(CheckpointError::Store)?;

        let message = format!("{SNAPSHOT_COMMIT_PREFIX}: {tag}");
        self.snapshots
            .commit_all_if_dirty(&message)
            .map_err(CheckpointError::Snapshot)?;
        let commit_hash = self
            .snapshots
            .head_commit_hash()
            .map_err(CheckpointError::Snapshot)?;

        let record = CheckpointRecord {
            history,
            auth_type: self.session.auth_type(),
        };
        self.store
            .save_checkpoint(&record, tag)
            .map_err(CheckpointError::Store)?;
        self.ledger
            .upsert(tag, &commit_hash)
            .map_err(CheckpointError::LedgerIo)?;

        tracing::info!(tag, commit = %commit_hash, "checkpoint saved");
        Ok(CommandOutcome::Info(format!(
            "Conversation checkpoint saved with tag: {tag} (commit {})",
            short_hash(&commit_hash)
        )))
    }

    /// Restore the working tree to the snapshot bound to `tag` and hand back
    /// the saved conversation. A dirty tree is refused before anything about
    /// `tag` is looked up.
    pub fn resume(&self, tag: &str) -> CommandOutcome {
        self.try_resume(tag).into()
    }

    fn try_resume(&self, tag: &str) -> Result<CommandOutcome, CheckpointError> {
        let tag = require_tag(tag, RESUME_USAGE)?;
        self.require_repository()?;
        if !self.snapshots.is_clean().map_err(CheckpointError::Snapshot)? {
            return Err(CheckpointError::DirtyWorkingTree);
        }

        let record = self
            .store
            .load_checkpoint(tag)
            .map_err(CheckpointError::Store)?
            .unwrap_or_default();
        if !has_conversation(&record.history, self.hidden_context_turns) {
            return Ok(CommandOutcome::Info(format!(
                "No saved checkpoint found with tag: {tag}."
            )));
        }

        let entry = self
            .ledger
            .find(tag)
            .map_err(CheckpointError::LedgerIo)?
            .ok_or_else(|| CheckpointError::NoCommitForTag {
                tag: tag.to_string(),
            })?;

        let current = self.session.auth_type();
        if let Some(stored) = &record.auth_type {
            if current.as_ref() != Some(stored) {
                return Err(CheckpointError::AuthMismatch {
                    tag: tag.to_string(),
                    stored: stored.clone(),
                    current,
                });
            }
        }

        self.snapshots
            .checkout(&entry.commit_hash)
            .map_err(|cause| CheckpointError::Checkout {
                hash: entry.commit_hash.clone(),
                cause,
            })?;

        tracing::info!(tag, commit = %entry.commit_hash, "checkpoint resumed");
        Ok(CommandOutcome::LoadHistory {
            display: to_display_history(&record.history, self.hidden_context_turns),
            raw: record.history,
        })
    }

    /// Remove `tag` from the ledger, then its checkpoint record. The checkpoint
    /// store is not touched when the ledger has no entry for `tag`.
    pub fn delete(&self, tag: &str) -> CommandOutcome {
        self.try_delete(tag).into()
    }

    fn try_delete(&self, tag: &str) -> Result<CommandOutcome, CheckpointError> {
        let tag = require_tag(tag, DELETE_USAGE)?;

        match self.ledger.remove(tag).map_err(CheckpointError::LedgerIo)? {
            LedgerRemoval::Removed(entry) => {
                tracing::debug!(tag, commit = %entry.commit_hash, "ledger entry removed");
            }
            LedgerRemoval::NotFound => {
                return Err(CheckpointError::NotAssociated {
                    tag: tag.to_string(),
                })
            }
        }

        if self
            .store
            .delete_checkpoint(tag)
            .map_err(CheckpointError::Store)?
        {
            tracing::info!(tag, "checkpoint deleted");
            Ok(CommandOutcome::Info(format!(
                "Conversation checkpoint '{tag}' has been deleted."
            )))
        } else {
            Err(CheckpointError::CheckpointNotFound {
                tag: tag.to_string(),
            })
        }
    }

    /// Saved checkpoints, oldest first. Failures yield an empty list.
    pub fn list(&self) -> Vec<ChatDetail> {
        listing::chat_details_or_empty(&self.ledger, &self.store, listing::Order::OldestFirst)
    }

    /// Compare ledger and checkpoint store and report entries present in only one.
    pub fn reconcile(&self) -> Result<ReconcileReport, CheckpointError> {
        reconcile::reconcile(&self.ledger, &self.store)
    }

    fn require_repository(&self) -> Result<(), CheckpointError> {
        match self.snapshots.check_repository() {
            RepoCheck::Repository => Ok(()),
            RepoCheck::NotRepository => Err(CheckpointError::NotARepository {
                root: self.project_root.display().to_string(),
            }),
            RepoCheck::CheckFailed(reason) => {
                Err(CheckpointError::RepositoryCheckFailed { reason })
            }
        }
    }
}

fn require_tag<'a>(tag: &'a str, usage: &'static str) -> Result<&'a str, CheckpointError> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        return Err(CheckpointError::MissingTag { usage });
    }
    Ok(trimmed)
}

fn short_hash(hash: &str) -> &str {
    hash.get(..7).unwrap_or(hash)
}

/// Render saved checkpoints for the list command.
pub fn format_chat_list(details: &[ChatDetail]) -> String {
    if details.is_empty() {
        return "No saved conversation checkpoints found.".to_string();
    }

    let mut out = String::from("List of saved conversations:\n");
    for detail in details {
        out.push_str(&format!(
            "  - {} (saved {})\n",
            detail.name,
            detail.mtime.format("%Y-%m-%d %H:%M:%S")
        ));
    }
    out.push_str("Note: newest last, oldest first");
    out
}

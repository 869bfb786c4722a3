use crate::models::{ConversationTurn, DisplayTurn};

use super::CheckpointError;

/// A checkpoint command that can be re-issued verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    List,
    Save { tag: String },
    Resume { tag: String },
    Delete { tag: String },
}

/// The invocation carried by a confirmation request. Replaying it is a fresh
/// call with confirmation set; no state survives between the two calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayInvocation {
    pub command: ChatCommand,
    pub overwrite_confirmed: bool,
}

/// Result of a checkpoint command, for the caller to render.
#[derive(Debug)]
pub enum CommandOutcome {
    Info(String),
    Error(CheckpointError),
    ConfirmAction {
        prompt: String,
        invocation: ReplayInvocation,
    },
    LoadHistory {
        display: Vec<DisplayTurn>,
        raw: Vec<ConversationTurn>,
    },
}

impl From<CheckpointError> for CommandOutcome {
    fn from(err: CheckpointError) -> Self {
        CommandOutcome::Error(err)
    }
}

impl From<Result<CommandOutcome, CheckpointError>> for CommandOutcome {
    fn from(result: Result<CommandOutcome, CheckpointError>) -> Self {
        result.unwrap_or_else(CommandOutcome::Error)
    }
}

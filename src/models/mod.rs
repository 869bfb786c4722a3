//! Data types shared by the ledger, the checkpoint store and the orchestrator.

pub mod constants;
pub mod conversation;
pub mod ledger;

pub use conversation::{
    AuthType, ChatDetail, CheckpointRecord, ConversationTurn, DisplayRole, DisplayTurn, Part,
};
pub use ledger::{LedgerEntry, LedgerRemoval};

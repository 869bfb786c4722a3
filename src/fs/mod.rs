pub mod checkpoint_store;
pub mod ledger;
pub mod locking;
pub mod state_dir;
pub mod tag_names;

pub use checkpoint_store::{CheckpointStore, FileCheckpointStore};
pub use ledger::TagLedger;
pub use state_dir::StateDir;
pub use tag_names::encode_tag;

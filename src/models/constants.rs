/// Number of leading history turns injected by the session itself (environment
/// context and its acknowledgement). Histories no longer than this hold no
/// user conversation.
pub const DEFAULT_HIDDEN_CONTEXT_TURNS: usize = 2;

/// Directory under the project root holding ledger, checkpoints and config.
pub const STATE_DIR_NAME: &str = ".snaptag";

/// Ledger file name inside the state directory.
pub const LEDGER_FILE_NAME: &str = "tag-commits.json";

/// Checkpoint directory name inside the state directory.
pub const CHECKPOINTS_DIR_NAME: &str = "checkpoints";

/// Optional configuration file inside the state directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default live session file inside the state directory.
pub const SESSION_FILE_NAME: &str = "session.json";

/// Prefix of the commit message used for snapshot commits.
pub const SNAPSHOT_COMMIT_PREFIX: &str = "snaptag checkpoint";

pub mod commands;
pub mod completions;
pub mod config;
pub mod fs;
pub mod git;
pub mod models;
pub mod orchestrator;
pub mod session;

pub use config::Config;
pub use orchestrator::{CheckpointError, CheckpointOrchestrator, CommandOutcome};

//! Integration tests for snaptag checkpoints
//!
//! These run the orchestrator against real git repositories and the
//! file-backed stores.

pub mod delete_flow;
pub mod helpers;
pub mod save_resume;

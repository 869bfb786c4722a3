//! Test helper functions for integration tests

use anyhow::{bail, Context, Result};
use snaptag::fs::FileCheckpointStore;
use snaptag::git::GitSnapshots;
use snaptag::models::{AuthType, ConversationTurn};
use snaptag::session::{FileSession, LiveSession};
use snaptag::{CheckpointOrchestrator, Config};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

pub type FileOrchestrator = CheckpointOrchestrator<FileCheckpointStore, GitSnapshots, FileSession>;

pub fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .with_context(|| format!("Failed to run git {args:?}"))?;
    if !output.status.success() {
        bail!(
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Creates a temporary git repository with initial commit
///
/// Returns a TempDir that must be kept in scope for the lifetime of the test
pub fn create_temp_git_repo() -> Result<TempDir> {
    let temp = TempDir::new().context("Failed to create temp directory")?;
    let root = temp.path();

    git(root, &["init"])?;
    git(root, &["config", "user.email", "test@test.com"])?;
    git(root, &["config", "user.name", "Test User"])?;
    git(root, &["config", "commit.gpgsign", "false"])?;

    std::fs::write(root.join("README.md"), "# Test Repository\n")
        .context("Failed to write README.md")?;
    git(root, &["add", "."])?;
    git(root, &["commit", "-m", "Initial commit"])?;

    Ok(temp)
}

pub fn head(repo: &Path) -> Result<String> {
    git(repo, &["rev-parse", "HEAD"])
}

pub fn commit_count(repo: &Path) -> Result<usize> {
    Ok(git(repo, &["rev-list", "--count", "HEAD"])?.parse()?)
}

/// Orchestrator over `repo` with the live session pre-populated.
pub fn orchestrator_for(
    repo: &Path,
    history: &[ConversationTurn],
    auth_type: Option<AuthType>,
) -> Result<FileOrchestrator> {
    let mut config = Config::with_defaults(repo);
    config.auth_type = auth_type;

    let orchestrator = CheckpointOrchestrator::from_config(&config);
    orchestrator.session().replace_history(history)?;
    Ok(orchestrator)
}

pub fn sample_history() -> Vec<ConversationTurn> {
    vec![
        ConversationTurn::user("This is the environment context."),
        ConversationTurn::model("Got it. Thanks for the context!"),
        ConversationTurn::user("Add a retry loop to the fetcher"),
        ConversationTurn::model("Added exponential backoff in fetch.rs"),
        ConversationTurn {
            role: "model".to_string(),
            parts: vec![],
        },
    ]
}

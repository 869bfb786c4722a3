//! Save and resume against a real repository

use snaptag::completions::complete_tags;
use snaptag::fs::CheckpointStore;
use snaptag::models::{AuthType, DisplayRole, LedgerEntry};
use snaptag::{CheckpointError, CheckpointOrchestrator, CommandOutcome, Config};
use tempfile::TempDir;

use super::helpers::{
    commit_count, create_temp_git_repo, git, head, orchestrator_for, sample_history,
};

#[test]
fn test_save_dirty_tree_then_resume_restores_files() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), Some(AuthType::ApiKey)).unwrap();

    std::fs::write(root.join("fetch.rs"), "fn fetch() { retry(); }\n").unwrap();
    let before = commit_count(root).unwrap();

    assert!(matches!(orch.save("retry-loop", false), CommandOutcome::Info(_)));
    assert_eq!(commit_count(root).unwrap(), before + 1);
    let snapshot = head(root).unwrap();
    assert_eq!(
        git(root, &["log", "-1", "--format=%s"]).unwrap(),
        "snaptag checkpoint: retry-loop"
    );

    std::fs::write(root.join("fetch.rs"), "fn fetch() {}\n").unwrap();
    git(root, &["commit", "-am", "later work"]).unwrap();

    match orch.resume("retry-loop") {
        CommandOutcome::LoadHistory { display, raw } => {
            assert_eq!(raw, sample_history());
            assert_eq!(display.len(), 2);
            assert_eq!(display[0].role, DisplayRole::User);
            assert_eq!(display[0].text, "Add a retry loop to the fetcher");
            assert_eq!(display[1].role, DisplayRole::Model);
        }
        other => panic!("expected history, got {other:?}"),
    }

    assert_eq!(head(root).unwrap(), snapshot);
    let content = std::fs::read_to_string(root.join("fetch.rs")).unwrap();
    assert_eq!(content, "fn fetch() { retry(); }\n");
}

#[test]
fn test_save_clean_tree_makes_no_commit() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), None).unwrap();
    let before = head(root).unwrap();

    assert!(matches!(orch.save("clean", false), CommandOutcome::Info(_)));

    assert_eq!(head(root).unwrap(), before);
    assert_eq!(
        orch.ledger().load().unwrap(),
        vec![LedgerEntry::new("clean", before)]
    );
}

#[test]
fn test_state_dir_does_not_dirty_the_tree() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), None).unwrap();

    orch.save("one", false);

    assert_eq!(git(root, &["status", "--porcelain"]).unwrap(), "");
}

#[test]
fn test_resave_overwrites_ledger_entry_in_place() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), None).unwrap();

    orch.save("same", false);
    std::fs::write(root.join("more.txt"), "more").unwrap();

    let invocation = match orch.save("same", false) {
        CommandOutcome::ConfirmAction { invocation, .. } => invocation,
        other => panic!("expected confirmation, got {other:?}"),
    };
    assert!(!git(root, &["status", "--porcelain"]).unwrap().is_empty());

    assert!(matches!(orch.run(&invocation), CommandOutcome::Info(_)));

    let entries = orch.ledger().load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].commit_hash, head(root).unwrap());
}

#[test]
fn test_resume_refuses_dirty_tree() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), None).unwrap();
    orch.save("t", false);

    std::fs::write(root.join("README.md"), "uncommitted edit\n").unwrap();

    match orch.resume("t") {
        CommandOutcome::Error(CheckpointError::DirtyWorkingTree) => {}
        other => panic!("expected dirty tree refusal, got {other:?}"),
    }
    let content = std::fs::read_to_string(root.join("README.md")).unwrap();
    assert_eq!(content, "uncommitted edit\n");
}

#[test]
fn test_resume_refuses_other_auth_context() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let saver = orchestrator_for(root, &sample_history(), Some(AuthType::OAuthPersonal)).unwrap();
    saver.save("t", false);

    let resumer = orchestrator_for(root, &[], Some(AuthType::VertexAi)).unwrap();
    let err = match resumer.resume("t") {
        CommandOutcome::Error(err) => err,
        other => panic!("expected auth mismatch, got {other:?}"),
    };
    assert!(matches!(err, CheckpointError::AuthMismatch { .. }));
    assert!(err.to_string().contains("oauth-personal"));
    assert!(err.to_string().contains("vertex-ai"));
}

#[test]
fn test_legacy_checkpoint_resumes_under_any_auth() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let saver = orchestrator_for(root, &sample_history(), None).unwrap();
    saver.save("legacy", false);
    let record = saver.store().load_checkpoint("legacy").unwrap().unwrap();
    assert!(record.auth_type.is_none());

    let resumer = orchestrator_for(root, &[], Some(AuthType::ApiKey)).unwrap();
    assert!(matches!(
        resumer.resume("legacy"),
        CommandOutcome::LoadHistory { .. }
    ));
}

#[test]
fn test_save_outside_repository_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config = Config::with_defaults(temp.path());
    let orch = CheckpointOrchestrator::from_config(&config);

    match orch.save("t", false) {
        CommandOutcome::Error(CheckpointError::NotARepository { .. }) => {}
        other => panic!("expected not-a-repository error, got {other:?}"),
    }
    assert!(!orch.store().checkpoint_exists("t").unwrap());
    assert!(!temp.path().join(".snaptag").exists());
}

#[test]
fn test_completed_tag_with_percent_resumes() {
    let repo = create_temp_git_repo().unwrap();
    let root = repo.path();
    let orch = orchestrator_for(root, &sample_history(), None).unwrap();
    assert!(matches!(orch.save("50%25off", false), CommandOutcome::Info(_)));

    let suggestions = complete_tags(&Config::with_defaults(root), "50");
    assert_eq!(suggestions, vec!["50%25off".to_string()]);

    assert!(matches!(
        orch.resume(&suggestions[0]),
        CommandOutcome::LoadHistory { .. }
    ));
    assert!(matches!(orch.delete(&suggestions[0]), CommandOutcome::Info(_)));
    assert!(orch.ledger().load().unwrap().is_empty());
}


//! Delete, list and reconcile against the file-backed stores

use snaptag::fs::CheckpointStore;
use snaptag::models::LedgerEntry;
use snaptag::{CheckpointError, CommandOutcome};

use super::helpers::{create_temp_git_repo, orchestrator_for, sample_history};

#[test]
fn test_delete_first_of_two_entries() {
    let repo = create_temp_git_repo().unwrap();
    let orch = orchestrator_for(repo.path(), &sample_history(), None).unwrap();
    orch.save("a", false);
    orch.save("b", false);

    assert!(matches!(orch.delete("a"), CommandOutcome::Info(_)));

    let entries = orch.ledger().load().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].tag, "b");
    assert!(!orch.store().checkpoint_exists("a").unwrap());
    assert!(orch.store().checkpoint_exists("b").unwrap());
}

#[test]
fn test_delete_unbound_checkpoint_keeps_record() {
    let repo = create_temp_git_repo().unwrap();
    let orch = orchestrator_for(repo.path(), &sample_history(), None).unwrap();
    orch.save("kept", false);
    orch.ledger().remove("kept").unwrap();

    match orch.delete("kept") {
        CommandOutcome::Error(CheckpointError::NotAssociated { .. }) => {}
        other => panic!("expected not-associated error, got {other:?}"),
    }
    assert!(orch.store().checkpoint_exists("kept").unwrap());
}

#[test]
fn test_list_and_reconcile_after_partial_delete() {
    let repo = create_temp_git_repo().unwrap();
    let orch = orchestrator_for(repo.path(), &sample_history(), None).unwrap();
    orch.save("whole", false);
    orch.save("half/gone", false);
    orch.store().delete_checkpoint("half/gone").unwrap();

    let names: Vec<String> = orch.list().into_iter().map(|d| d.name).collect();
    assert_eq!(names, vec!["whole"]);

    let report = orch.reconcile().unwrap();
    assert!(report.orphaned_checkpoints.is_empty());
    assert_eq!(report.orphaned_ledger_entries.len(), 1);
    assert_eq!(
        report.orphaned_ledger_entries[0],
        LedgerEntry::new("half/gone", orch.ledger().find("whole").unwrap().unwrap().commit_hash)
    );
}

//! Report ledger entries and checkpoint records that lost their counterpart.
//! Usage: snaptag reconcile

use anyhow::{anyhow, Result};
use colored::Colorize;

use crate::config::Config;
use crate::orchestrator::CheckpointOrchestrator;

pub fn execute(config: &Config) -> Result<()> {
    let orchestrator = CheckpointOrchestrator::from_config(config);
    let report = orchestrator.reconcile().map_err(|e| anyhow!(e))?;

    if report.is_consistent() {
        println!("{}", "Ledger and checkpoints are consistent.".green());
        return Ok(());
    }

    if !report.orphaned_ledger_entries.is_empty() {
        println!("{}", "Ledger entries without a saved checkpoint:".yellow());
        for entry in &report.orphaned_ledger_entries {
            println!("  - {} → {}", entry.tag, entry.commit_hash);
        }
    }

    if !report.orphaned_checkpoints.is_empty() {
        println!("{}", "Checkpoints without a ledger entry:".yellow());
        for tag in &report.orphaned_checkpoints {
            println!("  - {tag}");
        }
    }

    Ok(())
}

use anyhow::Result;
use std::path::Path;

use crate::config::Config;
use crate::fs::{FileCheckpointStore, TagLedger};
use crate::orchestrator::listing::{chat_details_or_empty, Order};

/// Context for shell completion
#[derive(Debug, Clone)]
pub struct CompletionContext {
    pub cwd: String,
    pub shell: String,
    pub cmdline: String,
    pub current_word: String,
    pub prev_word: String,
}

impl CompletionContext {
    /// Parse completion context from shell-provided arguments.
    ///
    /// Shells pass `[cwd, cmdline, current_word, prev_word]`; missing values
    /// default to empty (cwd to `.`).
    pub fn from_args(shell: &str, args: &[String]) -> Self {
        let cwd = args.first().cloned().unwrap_or_else(|| ".".to_string());
        let cmdline = args.get(1).cloned().unwrap_or_default();
        let current_word = args.get(2).cloned().unwrap_or_default();
        let prev_word = args.get(3).cloned().unwrap_or_default();

        Self {
            cwd,
            shell: shell.to_string(),
            cmdline,
            current_word,
            prev_word,
        }
    }
}

/// Saved tags starting with `prefix`, most recently saved first.
///
/// Lookup failures produce no suggestions.
pub fn complete_tags(config: &Config, prefix: &str) -> Vec<String> {
    let ledger = TagLedger::new(config.ledger_path());
    let store = FileCheckpointStore::new(config.checkpoints_dir());

    chat_details_or_empty(&ledger, &store, Order::NewestFirst)
        .into_iter()
        .map(|detail| detail.name)
        .filter(|name| prefix.is_empty() || name.starts_with(prefix))
        .collect()
}

/// Main entry point for dynamic completions. Prints one candidate per line.
pub fn complete_dynamic(ctx: &CompletionContext) -> Result<()> {
    let cwd = Path::new(&ctx.cwd);
    let prefix = &ctx.current_word;

    let completions = match ctx.prev_word.as_str() {
        "resume" | "load" | "delete" if ctx.cmdline.contains("chat") => Config::load(cwd)
            .map(|config| complete_tags(&config, prefix))
            .unwrap_or_default(),
        _ => Vec::new(),
    };

    for completion in completions {
        println!("{completion}");
    }

    Ok(())
}

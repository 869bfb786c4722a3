//! Chat checkpoint commands
//! Usage: snaptag chat [list|save <tag>|resume <tag>|delete <tag>]

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

use crate::config::Config;
use crate::models::{DisplayRole, DisplayTurn};
use crate::orchestrator::{ChatCommand, CheckpointOrchestrator, CommandOutcome, ReplayInvocation};
use crate::session::LiveSession;

/// List saved checkpoints, oldest first.
pub fn list(config: &Config) -> Result<()> {
    execute(config, ChatCommand::List, false)
}

/// Save the live conversation. `yes` skips the overwrite confirmation.
pub fn save(config: &Config, tag: String, yes: bool) -> Result<()> {
    execute(config, ChatCommand::Save { tag }, yes)
}

pub fn resume(config: &Config, tag: String) -> Result<()> {
    execute(config, ChatCommand::Resume { tag }, false)
}

pub fn delete(config: &Config, tag: String) -> Result<()> {
    execute(config, ChatCommand::Delete { tag }, false)
}

fn execute(config: &Config, command: ChatCommand, confirmed: bool) -> Result<()> {
    let orchestrator = CheckpointOrchestrator::from_config(config);
    let mut invocation = ReplayInvocation {
        command,
        overwrite_confirmed: confirmed,
    };

    loop {
        match orchestrator.run(&invocation) {
            CommandOutcome::Info(message) => {
                println!("{}", message.green());
                return Ok(());
            }
            CommandOutcome::Error(err) => return Err(anyhow!(err)),
            CommandOutcome::ConfirmAction {
                prompt,
                invocation: replay,
            } => {
                if !confirm(&prompt)? {
                    println!("Nothing changed.");
                    return Ok(());
                }
                invocation = replay;
            }
            CommandOutcome::LoadHistory { display, raw } => {
                orchestrator
                    .session()
                    .replace_history(&raw)
                    .context("Checkpoint restored but the live session could not be updated")?;
                print_history(&display);
                return Ok(());
            }
        }
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt.yellow());
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

fn print_history(display: &[DisplayTurn]) {
    println!("{}", "Checkpoint resumed.".green());
    println!("─────────────────────────────────────────────────────────");
    for turn in display {
        let label = match turn.role {
            DisplayRole::User => "user".cyan().bold(),
            DisplayRole::Model => "model".magenta().bold(),
        };
        println!("{label}: {}", turn.text);
    }
}

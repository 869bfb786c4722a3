use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use snaptag::commands::{chat, reconcile};
use snaptag::completions::{complete_dynamic, generate_completions, CompletionContext};
use snaptag::Config;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snaptag")]
#[command(about = "Tag conversation checkpoints and bind them to git snapshots", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save, resume, delete and list conversation checkpoints
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },

    /// Report ledger entries and checkpoints that have lost their counterpart
    Reconcile,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },

    /// Internal: Dynamic completion helper (invoked by shell)
    #[command(hide = true)]
    Complete {
        /// Shell type
        shell: String,
        /// Command line arguments being completed
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ChatCommands {
    /// List saved checkpoints, oldest first
    List,

    /// Save the current conversation and snapshot the working tree
    Save {
        /// Checkpoint tag
        tag: Option<String>,

        /// Overwrite an existing checkpoint without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Restore a checkpoint and check out its snapshot
    #[command(visible_alias = "load")]
    Resume {
        /// Checkpoint tag
        tag: Option<String>,
    },

    /// Delete a checkpoint and its snapshot binding
    Delete {
        /// Checkpoint tag
        tag: Option<String>,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SNAPTAG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate_completions(&mut cmd, shell, &mut std::io::stdout())
                .context("Failed to write completion script")
        }
        Commands::Complete { shell, args } => {
            let ctx = CompletionContext::from_args(&shell, &args);
            complete_dynamic(&ctx)
        }
        Commands::Reconcile => reconcile::execute(&load_config(cli.root)?),
        Commands::Chat { command } => {
            let config = load_config(cli.root)?;
            match command {
                ChatCommands::List => chat::list(&config),
                ChatCommands::Save { tag, yes } => chat::save(&config, tag.unwrap_or_default(), yes),
                ChatCommands::Resume { tag } => chat::resume(&config, tag.unwrap_or_default()),
                ChatCommands::Delete { tag } => chat::delete(&config, tag.unwrap_or_default()),
            }
        }
    }
}

fn load_config(root: Option<PathBuf>) -> Result<Config> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    Config::load(root)
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_load_is_alias_for_resume() {
        let cli = Cli::try_parse_from(["snaptag", "chat", "load", "t1"]).unwrap();
        match cli.command {
            Commands::Chat {
                command: ChatCommands::Resume { tag },
            } => assert_eq!(tag.as_deref(), Some("t1")),
            _ => panic!("expected resume"),
        }
    }

    #[test]
    fn test_save_accepts_missing_tag_for_usage_message() {
        let cli = Cli::try_parse_from(["snaptag", "chat", "save"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Chat {
                command: ChatCommands::Save { tag: None, yes: false }
            }
        ));
    }
}

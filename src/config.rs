//! Runtime configuration
//!
//! Built once in `main` and passed by reference to every component. Values
//! come from defaults, then `.snaptag/config.toml`, then environment.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::constants::{
    CHECKPOINTS_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_HIDDEN_CONTEXT_TURNS, LEDGER_FILE_NAME,
    SESSION_FILE_NAME, STATE_DIR_NAME,
};
use crate::models::AuthType;

/// Overrides the auth type recorded with new checkpoints and checked on resume.
pub const ENV_AUTH_TYPE: &str = "SNAPTAG_AUTH_TYPE";
/// Overrides the live session file.
pub const ENV_SESSION_FILE: &str = "SNAPTAG_SESSION_FILE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub project_root: PathBuf,
    pub state_dir: PathBuf,
    pub hidden_context_turns: usize,
    pub auth_type: Option<AuthType>,
    pub session_path: PathBuf,
}

/// On-disk shape of `.snaptag/config.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    hidden_context_turns: Option<usize>,
    auth_type: Option<String>,
    session_file: Option<PathBuf>,
}

impl Config {
    /// Defaults for `project_root` with no config file or environment applied.
    pub fn with_defaults(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let state_dir = project_root.join(STATE_DIR_NAME);
        Self {
            session_path: state_dir.join(SESSION_FILE_NAME),
            state_dir,
            project_root,
            hidden_context_turns: DEFAULT_HIDDEN_CONTEXT_TURNS,
            auth_type: None,
        }
    }

    /// Resolve configuration for `project_root`.
    pub fn load(project_root: impl Into<PathBuf>) -> Result<Self> {
        let mut config = Self::with_defaults(project_root);

        let config_path = config.config_file();
        if config_path.exists() {
            let content = fs::read_to_string(&config_path).with_context(|| {
                format!("Failed to read config file: {}", config_path.display())
            })?;
            let file: FileConfig = toml::from_str(&content).with_context(|| {
                format!("Failed to parse config file: {}", config_path.display())
            })?;
            config.apply_file(file);
        }

        config.apply_env();
        tracing::debug!(?config, "configuration resolved");
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(turns) = file.hidden_context_turns {
            self.hidden_context_turns = turns;
        }
        if let Some(auth) = file.auth_type.filter(|s| !s.trim().is_empty()) {
            self.auth_type = Some(AuthType::from(auth));
        }
        if let Some(session_file) = file.session_file {
            self.session_path = self.resolve(&session_file);
        }
    }

    fn apply_env(&mut self) {
        if let Ok(auth) = std::env::var(ENV_AUTH_TYPE) {
            if !auth.trim().is_empty() {
                self.auth_type = Some(AuthType::from(auth));
            }
        }
        if let Ok(session_file) = std::env::var(ENV_SESSION_FILE) {
            if !session_file.trim().is_empty() {
                self.session_path = self.resolve(Path::new(&session_file));
            }
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn ledger_path(&self) -> PathBuf {
        self.state_dir.join(LEDGER_FILE_NAME)
    }

    pub fn checkpoints_dir(&self) -> PathBuf {
        self.state_dir.join(CHECKPOINTS_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.state_dir.join(CONFIG_FILE_NAME)
    }
}

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// The `.snaptag/` directory inside the project root.
///
/// It carries its own `.gitignore` so snapshot commits never sweep snaptag's
/// state into the repository, and so saved checkpoints do not make the tree
/// look dirty.
pub struct StateDir {
    root: PathBuf,
    checkpoints: PathBuf,
}

impl StateDir {
    pub fn new(config: &Config) -> Self {
        Self {
            root: config.state_dir.clone(),
            checkpoints: config.checkpoints_dir(),
        }
    }

    /// Create the directory layout if missing. Idempotent.
    pub fn ensure(&self) -> Result<()> {
        fs::create_dir_all(&self.checkpoints).with_context(|| {
            format!("Failed to create state directory: {}", self.root.display())
        })?;

        let gitignore = self.root.join(".gitignore");
        if !gitignore.exists() {
            fs::write(&gitignore, "*\n").context("Failed to create .gitignore")?;
        }

        let readme = self.root.join("README.md");
        if !readme.exists() {
            fs::write(&readme, README).context("Failed to create README.md")?;
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

const README: &str = r#"# snaptag state

- `tag-commits.json` - ledger binding each checkpoint tag to a commit
- `checkpoints/` - saved conversation checkpoints, one file per tag
- `config.toml` - optional settings

Do not manually edit these files unless you know what you're doing.
"#;

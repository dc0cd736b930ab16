//! `essaydoc.toml` loading
//!
//! One file carries three optional tables:
//!
//! ```toml
//! [parser]
//! metadata_lines = 4
//!
//! [docx]
//! font_name = "Georgia"
//!
//! [pptx.bullets]
//! limit = 3
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use essaydoc_core::ParserConfig;
use essaydoc_ooxml::StyleProfile;
use essaydoc_pptx::DeckContract;
use serde::{Deserialize, Serialize};

/// File name looked up next to the input when `--config` is absent
pub const CONFIG_FILE_NAME: &str = "essaydoc.toml";

/// Combined configuration for every command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EssaydocConfig {
    pub parser: ParserConfig,
    pub docx: StyleProfile,
    pub pptx: DeckContract,
}

impl EssaydocConfig {
    /// Parse a configuration from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str).context("Invalid essaydoc configuration")?;
        config
            .pptx
            .validate()
            .context("Invalid [pptx] configuration")?;
        Ok(config)
    }

    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Resolve the configuration for a command.
    ///
    /// An explicit path must exist. Otherwise `essaydoc.toml` beside the
    /// input is used when present, and the defaults when not.
    pub fn resolve(explicit: Option<&Path>, input: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            return Self::load(path);
        }

        match discover(input) {
            Some(path) => {
                tracing::debug!("Using config {}", path.display());
                Self::load(&path)
            }
            None => Ok(Self::default()),
        }
    }
}

fn discover(input: &Path) -> Option<PathBuf> {
    if input.as_os_str() == "-" {
        return None;
    }
    let candidate = input.parent()?.join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

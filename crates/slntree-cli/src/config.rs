//! Optional TOML settings file.
//!
//! ```toml
//! max_depth = 4
//! include_assembly_dependencies = false
//! root = "Contoso.Shop"
//! revision = "4f2a9c1"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Settings read from `--config`. Every key is optional; command-line flags
/// take precedence over anything set here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub max_depth: Option<usize>,
    pub include_assembly_dependencies: Option<bool>,
    pub root: Option<String>,
    pub revision: Option<String>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

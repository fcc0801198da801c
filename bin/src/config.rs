//! Configuration for the `trilo` binary, loaded from `config.toml`.
//!
//! The path is picked as: `--config` / `TRILO_CONFIG` > `<config_dir>/trilo/config.toml`
//! if it exists > built-in defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Arguments processed by `trilo options` ahead of the command line.
    ///
    /// Options given on the command line replace these, since the last value wins.
    pub default_args: Vec<String>,
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    ///
    /// A CLI override must exist. The discovered path is skipped when missing.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path.filter(|p| p.is_file()) {
            return Self::load(path);
        }
        Ok(Self::default())
    }

    /// `<config_dir>/trilo/config.toml`, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trilo").join("config.toml"))
    }
}

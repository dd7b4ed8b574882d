//! Configuration management for the party CLI.

use anyhow::{Context, Result};
use party::prelude::PartyConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file `init` writes and `run` looks for.
pub const CONFIG_FILE: &str = "party.toml";

/// Party project configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub run: RunConfig,
    #[serde(default)]
    pub party: PartyConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Stop as soon as no normal is left.
    #[serde(default)]
    pub stop_when_overrun: bool,
}

// Default value functions
fn default_ticks() -> u64 { 100 }

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            stop_when_overrun: false,
        }
    }
}

impl Config {
    /// Load config from party.toml in the current or parent directories.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        Self::load_from(&cwd)
    }

    /// Load config from party.toml in `dir` or its parents, falling back
    /// to the defaults when there is none.
    pub fn load_from(dir: &Path) -> Result<Self> {
        match find_config_file(dir) {
            Some(path) => Self::read(&path),
            None => Ok(Config::default()),
        }
    }

    /// Read and validate a specific config file.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config
            .party
            .validate()
            .with_context(|| format!("Invalid config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to the specified path.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }
}

/// Find party.toml in `start` or its parent directories.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

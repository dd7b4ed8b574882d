//! Write a default party.toml.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};

pub fn run(path: Option<String>) -> Result<()> {
    let base_path = match path {
        Some(p) => PathBuf::from(p),
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    println!("{} Initializing party...", "→".blue());
    let config_path = write_default_config(&base_path)?;

    println!();
    println!("{} Party ready: {}", "✓".green().bold(), config_path.display());
    println!();
    println!("Next steps:");
    println!("  {} edit {} to pick the guests", "1.".blue(), CONFIG_FILE);
    println!("  {} party run", "2.".blue());

    Ok(())
}

/// Create `base_path` if needed and write the default config there, unless
/// one already exists. Returns the config path.
pub fn write_default_config(base_path: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(base_path)
        .with_context(|| format!("Failed to create {}", base_path.display()))?;

    let config_path = base_path.join(CONFIG_FILE);
    if !config_path.exists() {
        Config::default().save(&config_path)?;
        println!("  {} Created {}", "✓".green(), config_path.display());
    } else {
        println!("  {} {} already exists", "•".yellow(), config_path.display());
    }
    Ok(config_path)
}

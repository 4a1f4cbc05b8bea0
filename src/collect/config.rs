use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Run configuration naming the parsed-boundary interchange files for
/// each tier. Files concatenate in listed order; the bundled correction
/// rules cite record indices into that concatenation, so the order is
/// part of the contract.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub towns: TierConfig,
    pub villages: TierConfig,
    pub neighborhoods: TierConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TierConfig {
    pub paths: Vec<PathBuf>,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}

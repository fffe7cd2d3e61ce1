//! Configuration management for the lazycraft CLI

use anyhow::{Context, Result};
use lazycraft::{CraftConfig, CraftOptions};
use std::fs;
use std::path::{Path, PathBuf};

/// Options file plus the path it was loaded from.
#[derive(Debug)]
pub struct Config {
    pub options: CraftOptions,
    path: PathBuf,
}

impl Config {
    /// Get the default path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("lazycraft");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path` (or the default location), falling
    /// back to defaults when the file doesn't exist
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::config_path()?,
        };

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Config {
                options: CraftOptions::default(),
                path,
            });
        }

        let options = CraftOptions::load(&path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        Ok(Config { options, path })
    }

    /// Save configuration as TOML
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create config directory at {}", parent.display())
                })?;
            }
        }

        let contents = self
            .options
            .to_toml()
            .context("Failed to serialize config")?;

        fs::write(&self.path, contents)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Validate the stored options
    pub fn craft_config(&self) -> Result<CraftConfig> {
        self.options
            .validate()
            .with_context(|| format!("Invalid config in {}", self.path.display()))
    }
}

//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting lazycraft defaults.

use crate::config::Config;
use anyhow::{Context, Result};
use lazycraft::StopKey;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `max_retries` - New retry budget
/// * `stop_key` - New stop key name
/// * `mod_dir` - New mod list directory
/// * `show` - If true, show current configuration
pub fn handle(
    mut config: Config,
    max_retries: Option<i64>,
    stop_key: Option<String>,
    mod_dir: Option<PathBuf>,
    show: bool,
) -> Result<()> {
    if show {
        show_config(&config);
        return Ok(());
    }

    if max_retries.is_none() && stop_key.is_none() && mod_dir.is_none() {
        show_usage();
        return Ok(());
    }

    apply(&mut config, max_retries, stop_key, mod_dir)?;
    config.save()?;

    println!("Config saved to: {}", config.path().display());
    Ok(())
}

/// Update options, rejecting values that would not validate
fn apply(
    config: &mut Config,
    max_retries: Option<i64>,
    stop_key: Option<String>,
    mod_dir: Option<PathBuf>,
) -> Result<()> {
    if let Some(n) = max_retries {
        config.options.max_retries = n;
    }
    if let Some(key) = stop_key {
        let key: StopKey = key.parse()?;
        config.options.stop_key = key.name().to_string();
    }
    if let Some(dir) = mod_dir {
        config.options.mod_files_dir = dir;
    }

    config
        .options
        .validate()
        .context("Refusing to save invalid config")?;
    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) {
    let options = &config.options;
    println!("Max retries:  {}", options.max_retries);
    println!("Stop key:     {}", options.stop_key);
    println!("Mod lists:    {}", options.mod_files_dir.display());
    println!(
        "Delays:       key {}s, clipboard {}s, mouse {}s",
        options.execution_delays.key_press_delay,
        options.execution_delays.clipboard_copy_delay,
        options.mouse_speed
    );
    println!(
        "Item slot:    ({}, {}) {}x{}",
        options.item_slot[0],
        options.item_slot[1],
        options.item_block_size[0],
        options.item_block_size[1]
    );

    if let Err(e) = options.validate() {
        println!("Warning: {}", e);
    }
    println!("Config file:  {}", config.path().display());
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: lazycraft configure --max-retries N --stop-key KEY --mod-dir DIR");
    println!("   or: lazycraft configure --show");
    println!();
    let keys: Vec<&str> = StopKey::ALL.iter().map(|k| k.name()).collect();
    println!("Stop keys: {}", keys.join(", "));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config() -> (tempfile::TempDir, Config) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        (dir, config)
    }

    #[test]
    fn test_show_usage_does_not_panic() {
        show_usage();
    }

    #[test]
    fn test_apply_normalizes_stop_key() {
        let (_dir, mut config) = temp_config();
        apply(&mut config, Some(7), Some("f8".into()), Some("lists".into())).unwrap();

        assert_eq!(config.options.max_retries, 7);
        assert_eq!(config.options.stop_key, "F8");
        assert_eq!(config.options.mod_files_dir, PathBuf::from("lists"));
    }

    #[test]
    fn test_apply_rejects_invalid_values() {
        let (_dir, mut config) = temp_config();
        assert!(apply(&mut config, Some(0), None, None).is_err());
        assert!(apply(&mut config, None, Some("F13".into()), None).is_err());
    }

    #[test]
    fn test_handle_saves() {
        let (dir, config) = temp_config();
        handle(config, Some(9), None, None, false).unwrap();

        let reloaded = Config::load(Some(&dir.path().join("config.toml"))).unwrap();
        assert_eq!(reloaded.options.max_retries, 9);
    }
}

//! Configuration loading and discovery for `stash.toml`
//!
//! Provides functions to find, load, and override configuration.

use super::schema::StashConfig;
use crate::bitmap::Background;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "stash.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse stash.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override output root
    pub out: Option<PathBuf>,
    /// Override frame width
    pub frame_width: Option<u32>,
    /// Override frame height
    pub frame_height: Option<u32>,
    /// Override background convention
    pub background: Option<Background>,
    /// Override playback speed
    pub speed: Option<u32>,
    /// Override simulated tick rate
    pub tick_rate: Option<u32>,
}

/// Find stash.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for stash.toml
/// 2. Check XDG_CONFIG_HOME/spritestash/stash.toml (or ~/.config/spritestash/stash.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find stash.toml in XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritestash").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find stash.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a stash.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses `find_config()`
/// to locate the config file. If no config file is found, returns the defaults.
pub fn load_config(path: Option<&Path>) -> Result<StashConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("Loading config from {}", p.display());
            load_config_file(&p)
        }
        None => Ok(StashConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<StashConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: StashConfig = toml::from_str(&contents)?;
    check(&config)?;
    Ok(config)
}

fn check(config: &StashConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(())
}

/// Apply CLI overrides on top of a loaded configuration.
///
/// The merged result is validated again, so an override such as `--speed 0`
/// is reported the same way as a bad file value.
pub fn merge_cli_overrides(
    mut config: StashConfig,
    overrides: &CliOverrides,
) -> Result<StashConfig, ConfigError> {
    if let Some(out) = &overrides.out {
        config.output.root = out.clone();
    }
    if let Some(width) = overrides.frame_width {
        config.slice.frame_width = width;
    }
    if let Some(height) = overrides.frame_height {
        config.slice.frame_height = height;
    }
    if let Some(background) = overrides.background {
        config.slice.background = background;
    }
    if let Some(speed) = overrides.speed {
        config.playback.speed = speed;
    }
    if let Some(tick_rate) = overrides.tick_rate {
        config.playback.tick_rate = tick_rate;
    }
    check(&config)?;
    Ok(config)
}

//! Configuration module for SpriteStash
//!
//! Provides types, discovery and parsing for `stash.toml`.

pub mod loader;
pub mod schema;

pub use loader::{
    find_config, find_config_from, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    CONFIG_FILE,
};
pub use schema::*;

//! Configuration schema types for `stash.toml`
//!
//! Defines the structure and validation rules for SpriteStash settings.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::bitmap::Background;
use crate::navigator::{MAX_SPEED, MIN_SPEED};

/// Where saved entities go
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// Root folder; each entity is saved to `<root>/<entity name>/`
    #[serde(default = "default_root")]
    pub root: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { root: default_root() }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from("out_sprites")
}

/// Grid slicing defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SliceConfig {
    /// Frame width in pixels
    #[serde(default = "default_frame_size")]
    pub frame_width: u32,
    /// Frame height in pixels
    #[serde(default = "default_frame_size")]
    pub frame_height: u32,
    /// How empty cells are recognised: "auto", "alpha" or "#RRGGBB"
    #[serde(default)]
    pub background: Background,
}

impl Default for SliceConfig {
    fn default() -> Self {
        Self {
            frame_width: default_frame_size(),
            frame_height: default_frame_size(),
            background: Background::default(),
        }
    }
}

fn default_frame_size() -> u32 {
    32
}

/// Playback defaults
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaybackConfig {
    /// Initial speed (1-10)
    #[serde(default = "default_speed")]
    pub speed: u32,
    /// Simulated ticks per second for headless playback
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { speed: default_speed(), tick_rate: default_tick_rate() }
    }
}

fn default_speed() -> u32 {
    MIN_SPEED
}

fn default_tick_rate() -> u32 {
    60
}

/// Complete `stash.toml` contents
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StashConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub slice: SliceConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "slice.frame_width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stash.toml: '{}' {}", self.field, self.message)
    }
}

impl StashConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.output.root.as_os_str().is_empty() {
            errors.push(ConfigValidationError {
                field: "output.root".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.slice.frame_width == 0 {
            errors.push(ConfigValidationError {
                field: "slice.frame_width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if self.slice.frame_height == 0 {
            errors.push(ConfigValidationError {
                field: "slice.frame_height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        if !(MIN_SPEED..=MAX_SPEED).contains(&self.playback.speed) {
            errors.push(ConfigValidationError {
                field: "playback.speed".to_string(),
                message: format!("must be between {} and {}", MIN_SPEED, MAX_SPEED),
            });
        }

        if self.playback.tick_rate == 0 {
            errors.push(ConfigValidationError {
                field: "playback.tick_rate".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StashConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.output.root, PathBuf::from("out_sprites"));
        assert_eq!((config.slice.frame_width, config.slice.frame_height), (32, 32));
        assert_eq!(config.slice.background, Background::Auto);
        assert_eq!(config.playback.speed, 1);
        assert_eq!(config.playback.tick_rate, 60);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: StashConfig = toml::from_str(
            r##"
[slice]
frame_width = 288
background = "#FF00FF"
"##,
        )
        .unwrap();
        assert_eq!(config.slice.frame_width, 288);
        assert_eq!(config.slice.frame_height, 32);
        assert_eq!(config.slice.background, Background::Key([255, 0, 255]));
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn test_bad_background_fails_to_parse() {
        let result: Result<StashConfig, _> = toml::from_str("[slice]\nbackground = \"pink\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_errors() {
        let mut config = StashConfig::default();
        config.slice.frame_width = 0;
        config.playback.speed = 11;
        config.playback.tick_rate = 0;

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["slice.frame_width", "playback.speed", "playback.tick_rate"]);
        assert_eq!(errors[1].to_string(), "stash.toml: 'playback.speed' must be between 1 and 10");
    }

    #[test]
    fn test_serialize_roundtrip() {
        let mut config = StashConfig::default();
        config.slice.background = Background::Key([0, 128, 255]);
        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("background = \"#0080FF\""));
        let parsed: StashConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}

//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod edit;
mod info;
mod play;
mod slice;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::bitmap::Background;
use crate::config::{load_config, merge_cli_overrides, CliOverrides, ConfigError, StashConfig};
use crate::error::StashError;
use crate::models::SpriteEntity;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// SpriteStash - Slice spritesheets into named animation states
#[derive(Parser)]
#[command(name = "stash")]
#[command(about = "SpriteStash - Slice spritesheets into animation states, preview and save them")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Use this stash.toml instead of searching for one
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Which level of the hierarchy `edit` changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Target {
    Entity,
    State,
    Sprite,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Slice a spritesheet on a fixed grid and save the sprites
    Slice {
        /// Spritesheet image (PNG or any format the image crate decodes)
        sheet: PathBuf,

        /// Frame width in pixels (default from stash.toml, else 32)
        #[arg(short = 'W', long)]
        width: Option<u32>,

        /// Frame height in pixels (default from stash.toml, else 32)
        #[arg(short = 'H', long)]
        height: Option<u32>,

        /// Output root; the entity is saved to <root>/<name>/
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Empty-cell convention: auto, alpha or #RRGGBB
        #[arg(long)]
        background: Option<Background>,

        /// Print the resulting states without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Load a saved entity and print its states
    Info {
        /// Path to metadata.json
        metadata: PathBuf,
    },

    /// Play a saved entity headlessly, printing each frame change
    Play {
        /// Path to metadata.json
        metadata: PathBuf,

        /// Playback speed (1-10)
        #[arg(long)]
        speed: Option<u32>,

        /// Seconds of playback to simulate
        #[arg(long, default_value = "1.0")]
        seconds: f64,

        /// Simulated ticks per second
        #[arg(long)]
        tick_rate: Option<u32>,

        /// Start at this state
        #[arg(long, default_value = "0")]
        state: usize,

        /// Start at this sprite of the state
        #[arg(long, default_value = "0")]
        sprite: usize,
    },

    /// Edit names and descriptions, then save back in place
    Edit {
        /// Path to metadata.json
        metadata: PathBuf,

        /// What to edit
        #[arg(long, value_enum)]
        target: Target,

        /// State index (for state and sprite targets)
        #[arg(long, default_value = "0")]
        state: usize,

        /// Sprite index (for sprite targets)
        #[arg(long, default_value = "0")]
        sprite: usize,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Render every state of a saved entity into one PNG
    Preview {
        /// Path to metadata.json
        metadata: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Scale output by integer factor (1-64)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    log::debug!("Running with verbosity {}", cli.verbose);

    let config = cli.config.as_deref();
    match cli.command {
        Commands::Slice { sheet, width, height, out, background, dry_run } => {
            let overrides = CliOverrides {
                out,
                frame_width: width,
                frame_height: height,
                background,
                ..Default::default()
            };
            slice::run_slice(&sheet, config, &overrides, dry_run)
        }
        Commands::Info { metadata } => info::run_info(&metadata),
        Commands::Play { metadata, speed, seconds, tick_rate, state, sprite } => {
            let overrides = CliOverrides { speed, tick_rate, ..Default::default() };
            play::run_play(&metadata, config, &overrides, seconds, state, sprite)
        }
        Commands::Edit { metadata, target, state, sprite, name, description } => edit::run_edit(
            &metadata,
            target,
            state,
            sprite,
            name.as_deref(),
            description.as_deref(),
        ),
        Commands::Preview { metadata, output, scale } => {
            info::run_preview(&metadata, &output, scale)
        }
    }
}

/// Console logging: 0 = warn, 1 (-v) = info, 2 (-vv) = debug, 3+ = trace.
///
/// `RUST_LOG` wins when set.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_millis()
        .try_init();
}

/// Load stash.toml (explicit path or discovered) and apply CLI overrides.
fn load_settings(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<StashConfig, ConfigError> {
    let config = load_config(config_path)?;
    merge_cli_overrides(config, overrides)
}

/// Report a configuration error and pick the exit code.
fn config_failure(err: ConfigError) -> ExitCode {
    eprintln!("Error: {}", err);
    match err {
        ConfigError::Validation(_) => ExitCode::from(EXIT_INVALID_ARGS),
        _ => ExitCode::from(EXIT_ERROR),
    }
}

/// Report a core error and pick the exit code.
///
/// Bad frame sizes and bad indices are invalid arguments; everything else is
/// an error.
fn failure(err: StashError) -> ExitCode {
    eprintln!("Error: {}", err);
    log::debug!("{:?}", err);
    ExitCode::from(exit_code_for(&err))
}

fn exit_code_for(err: &StashError) -> u8 {
    match err {
        StashError::InvalidDimensions { .. }
        | StashError::IndexOutOfRange { .. } => EXIT_INVALID_ARGS,
        _ => EXIT_ERROR,
    }
}

/// Print an entity as an indented tree.
fn print_tree(entity: &SpriteEntity) {
    println!("Entity: {}", entity.name());
    if !entity.description().is_empty() {
        println!("  Description: {}", entity.description());
    }
    println!("  Source: {}", entity.source());
    println!("  Frame size: {}x{}", entity.frame_width(), entity.frame_height());
    println!("  States: {} ({} sprite(s))", entity.states().len(), entity.sprite_count());
    for (i, state) in entity.states().iter().enumerate() {
        let label = if state.description().is_empty() {
            String::new()
        } else {
            format!(" - {}", state.description())
        };
        println!("  [{}] {}: {} sprite(s){}", i, state.name(), state.len(), label);
        for (j, sprite) in state.sprites().iter().enumerate() {
            if sprite.name().is_empty() && sprite.description().is_empty() {
                continue;
            }
            println!("      ({}) {} {}", j, sprite.name(), sprite.description());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_slice_flags() {
        let cli = Cli::try_parse_from([
            "stash",
            "-vv",
            "slice",
            "sheet.png",
            "-W",
            "16",
            "-H",
            "24",
            "--background",
            "#FF00FF",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Slice { sheet, width, height, out, background, dry_run } => {
                assert_eq!(sheet, PathBuf::from("sheet.png"));
                assert_eq!(width, Some(16));
                assert_eq!(height, Some(24));
                assert_eq!(out, None);
                assert_eq!(background, Some(Background::Key([255, 0, 255])));
                assert!(dry_run);
            }
            _ => panic!("expected slice command"),
        }
    }

    #[test]
    fn test_parse_rejects_bad_background() {
        let result = Cli::try_parse_from(["stash", "slice", "s.png", "--background", "pink"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_edit_target() {
        let cli = Cli::try_parse_from([
            "stash",
            "edit",
            "out/Fire/metadata.json",
            "--target",
            "sprite",
            "--state",
            "1",
            "--sprite",
            "4",
            "--name",
            "flare",
        ])
        .unwrap();
        match cli.command {
            Commands::Edit { target, state, sprite, name, description, .. } => {
                assert_eq!(target, Target::Sprite);
                assert_eq!((state, sprite), (1, 4));
                assert_eq!(name.as_deref(), Some("flare"));
                assert_eq!(description, None);
            }
            _ => panic!("expected edit command"),
        }
    }

    #[test]
    fn test_failure_exit_codes() {
        let invalid = StashError::InvalidDimensions { width: 0, height: 3 };
        assert_eq!(exit_code_for(&invalid), EXIT_INVALID_ARGS);
        let missing = StashError::MissingPixels { state: 0, sprite: 0 };
        assert_eq!(exit_code_for(&missing), EXIT_ERROR);
    }
}

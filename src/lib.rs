//! SpriteStash - Library for slicing spritesheets into named animation states
//!
//! This library provides functionality to:
//! - Slice a spritesheet on a fixed grid, dropping empty cells
//! - Organize frames into an entity -> state -> sprite hierarchy
//! - Navigate and play back frames with a speed-controlled clock
//! - Save sprites as PNGs plus a `metadata.json` document and load them back
//! - Render an overview image of every state

pub mod bitmap;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod navigator;
pub mod output;
pub mod overview;
pub mod persist;
pub mod slicer;

pub use bitmap::{Background, Bitmap};
pub use error::{Result, StashError};
pub use models::{MetadataDocument, Sprite, SpriteEntity, StateSequence};
pub use navigator::{EditTarget, NavigationState, Navigator};

//! Data models for SpriteStash (entities, states, sprites and their saved form)

mod document;
mod entity;
mod sprite;

// Re-export all public types
pub use document::{MetadataDocument, SpriteRecord, StateRecord};
pub use entity::SpriteEntity;
pub use sprite::{Sprite, StateSequence};

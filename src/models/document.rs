//! Serialized form of a sprite entity (`metadata.json`).
//!
//! Pixel data is never embedded; each sprite points at its image file through
//! `imageRef`. Older documents used snake_case names (`sprite_width`,
//! `image_url`); those are accepted as aliases.

use serde::{Deserialize, Serialize};

/// Top-level metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source: String,
    #[serde(alias = "sprite_width")]
    pub frame_width: u32,
    #[serde(alias = "sprite_height")]
    pub frame_height: u32,
    pub states: Vec<StateRecord>,
}

/// One state (animation sequence) in a metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StateRecord {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub sprites: Vec<SpriteRecord>,
}

/// One sprite in a metadata document
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SpriteRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(alias = "image_url")]
    pub image_ref: String,
}

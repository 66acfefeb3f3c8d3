//! The sprite entity: every state sliced from one spritesheet.

use std::path::Path;

use super::document::{MetadataDocument, SpriteRecord, StateRecord};
use super::sprite::{Sprite, StateSequence};

/// The full named collection of states derived from one spritesheet.
///
/// The structure (how many states, how many sprites per state) is fixed when
/// the entity is created. Afterwards only text fields change in place; a new
/// slice or a reload replaces the whole entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpriteEntity {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) source: String,
    pub(crate) frame_width: u32,
    pub(crate) frame_height: u32,
    pub(crate) states: Vec<StateSequence>,
}

impl SpriteEntity {
    pub fn new(
        name: impl Into<String>,
        source: impl Into<String>,
        frame_width: u32,
        frame_height: u32,
        states: Vec<StateSequence>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            source: source.into(),
            frame_width,
            frame_height,
            states,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Origin of this entity (the spritesheet path it was sliced from)
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn frame_width(&self) -> u32 {
        self.frame_width
    }

    pub fn frame_height(&self) -> u32 {
        self.frame_height
    }

    pub fn states(&self) -> &[StateSequence] {
        &self.states
    }

    /// Total number of sprites across all states
    pub fn sprite_count(&self) -> usize {
        self.states.iter().map(StateSequence::len).sum()
    }

    /// Largest number of sprites in any single state
    pub fn max_state_len(&self) -> usize {
        self.states.iter().map(StateSequence::len).max().unwrap_or(0)
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn state_mut(&mut self, index: usize) -> Option<&mut StateSequence> {
        self.states.get_mut(index)
    }

    pub fn sprite_mut(&mut self, state: usize, sprite: usize) -> Option<&mut Sprite> {
        self.states.get_mut(state)?.sprite_mut(sprite)
    }

    /// File name of the source spritesheet, for display.
    ///
    /// Sources saved on Windows use `\` separators, so both kinds are split.
    pub fn source_file_name(&self) -> &str {
        self.source.rsplit(['/', '\\']).next().unwrap_or(&self.source)
    }

    /// Default entity name for a spritesheet path: its file stem.
    pub fn name_for_source(path: &Path) -> String {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Everything except pixel buffers, in metadata document form.
    ///
    /// Two entities are structurally equal when their documents are equal.
    pub fn to_document(&self) -> MetadataDocument {
        MetadataDocument {
            name: self.name.clone(),
            description: self.description.clone(),
            source: self.source.clone(),
            frame_width: self.frame_width,
            frame_height: self.frame_height,
            states: self
                .states
                .iter()
                .map(|state| StateRecord {
                    name: state.name.clone(),
                    description: state.description.clone(),
                    sprites: state
                        .sprites
                        .iter()
                        .map(|sprite| SpriteRecord {
                            name: sprite.name.clone(),
                            description: sprite.description.clone(),
                            image_ref: sprite.image_ref.clone(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Rebuild the hierarchy from a document. Pixel buffers start absent.
    pub fn from_document(doc: MetadataDocument) -> Self {
        Self {
            name: doc.name,
            description: doc.description,
            source: doc.source,
            frame_width: doc.frame_width,
            frame_height: doc.frame_height,
            states: doc
                .states
                .into_iter()
                .map(|state| StateSequence {
                    name: state.name,
                    description: state.description,
                    sprites: state
                        .sprites
                        .into_iter()
                        .map(|sprite| Sprite {
                            name: sprite.name,
                            description: sprite.description,
                            image_ref: sprite.image_ref,
                            pixels: None,
                        })
                        .collect(),
                })
                .collect(),
        }
    }

    /// Whether `other` has the same names, descriptions, dimensions and shape.
    pub fn same_structure(&self, other: &SpriteEntity) -> bool {
        self.to_document() == other.to_document()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn entity_with_shape(shape: &[usize]) -> SpriteEntity {
        let states = shape
            .iter()
            .enumerate()
            .map(|(i, &n)| {
                let sprites = (0..n)
                    .map(|_| Sprite::from_pixels(RgbaImage::from_pixel(4, 4, Rgba([9, 9, 9, 255]))))
                    .collect();
                StateSequence::new(format!("State{}", i), sprites)
            })
            .collect();
        SpriteEntity::new("hero", "sheets/hero.png", 4, 4, states)
    }

    #[test]
    fn test_counts() {
        let entity = entity_with_shape(&[3, 5, 1]);
        assert_eq!(entity.sprite_count(), 9);
        assert_eq!(entity.max_state_len(), 5);
        assert_eq!(SpriteEntity::default().max_state_len(), 0);
    }

    #[test]
    fn test_document_roundtrip_drops_pixels_only() {
        let mut entity = entity_with_shape(&[2, 1]);
        entity.set_description("a hero");
        entity.sprite_mut(1, 0).unwrap().set_name("jump");

        let rebuilt = SpriteEntity::from_document(entity.to_document());
        assert!(rebuilt.same_structure(&entity));
        assert!(rebuilt.states()[0].sprites()[0].pixels().is_none());
        assert_eq!(rebuilt.states()[1].sprites()[0].name(), "jump");
    }

    #[test]
    fn test_same_structure_detects_text_change() {
        let a = entity_with_shape(&[2]);
        let mut b = a.clone();
        b.state_mut(0).unwrap().set_description("changed");
        assert!(!a.same_structure(&b));
    }

    #[test]
    fn test_source_file_name_handles_both_separators() {
        let mut entity = entity_with_shape(&[1]);
        assert_eq!(entity.source_file_name(), "hero.png");
        entity.source = r"C:\sheets\fire_288x128.png".to_string();
        assert_eq!(entity.source_file_name(), "fire_288x128.png");
    }

    #[test]
    fn test_name_for_source_uses_stem() {
        assert_eq!(SpriteEntity::name_for_source(Path::new("raw/fire_FREE.png")), "fire_FREE");
    }

    #[test]
    fn test_mutators_out_of_range_return_none() {
        let mut entity = entity_with_shape(&[1]);
        assert!(entity.state_mut(1).is_none());
        assert!(entity.sprite_mut(0, 1).is_none());
    }
}

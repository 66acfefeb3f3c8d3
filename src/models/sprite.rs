//! Sprite and state types.

use image::RgbaImage;

/// One grid cell's cropped image plus its metadata.
///
/// `pixels` is the decoded buffer. It is present after slicing or loading and
/// is swapped for a freshly decoded buffer whenever the sprite is saved.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sprite {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) image_ref: String,
    pub(crate) pixels: Option<RgbaImage>,
}

impl Sprite {
    /// Create an unnamed, unsaved sprite from a cropped buffer.
    pub fn from_pixels(pixels: RgbaImage) -> Self {
        Self { pixels: Some(pixels), ..Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Path of the image file this sprite was last saved to (empty if never saved)
    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn pixels(&self) -> Option<&RgbaImage> {
        self.pixels.as_ref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

/// An ordered animation sequence, one per surviving spritesheet row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateSequence {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) sprites: Vec<Sprite>,
}

impl StateSequence {
    pub fn new(name: impl Into<String>, sprites: Vec<Sprite>) -> Self {
        Self { name: name.into(), description: String::new(), sprites }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn sprites(&self) -> &[Sprite] {
        &self.sprites
    }

    /// Number of frames in this sequence
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn sprite_mut(&mut self, index: usize) -> Option<&mut Sprite> {
        self.sprites.get_mut(index)
    }
}

//! Grid slicing - cuts a spritesheet into fixed-size frames, one state per row
//!
//! Cells are scanned row by row, left to right. A cell whose visible pixels
//! have a zero-area bounding rectangle is empty and dropped. Rows that keep at
//! least one frame become states named `State0`, `State1`, ... numbered over
//! surviving rows only. Partial cells at the right and bottom edges are
//! dropped rather than padded.

use image::GenericImageView;
use std::path::Path;

use crate::bitmap::{bounding_rect, Background, Bitmap};
use crate::error::{Result, StashError};
use crate::models::{Sprite, SpriteEntity, StateSequence};

/// Slice `bitmap` into `cell_width` x `cell_height` frames.
///
/// A cell size larger than the sheet is clamped to the sheet's size, so an
/// oversized request yields a single cell along that axis.
///
/// # Errors
///
/// * `InvalidDimensions` if either cell dimension is zero
/// * `NoVisibleFrames` if every cell is empty
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritestash::bitmap::{Background, Bitmap};
/// use spritestash::slicer::slice;
///
/// let sheet = Bitmap::from_rgba(RgbaImage::from_pixel(8, 4, Rgba([255, 0, 0, 255])), true);
/// let entity = slice(&sheet, 4, 4, "sheet.png", Background::Auto).unwrap();
/// assert_eq!(entity.states().len(), 1);
/// assert_eq!(entity.states()[0].len(), 2);
/// ```
pub fn slice(
    bitmap: &Bitmap,
    cell_width: u32,
    cell_height: u32,
    source: &str,
    background: Background,
) -> Result<SpriteEntity> {
    if cell_width == 0 || cell_height == 0 {
        return Err(StashError::InvalidDimensions { width: cell_width, height: cell_height });
    }

    let (sheet_width, sheet_height) = (bitmap.width(), bitmap.height());
    let width = cell_width.min(sheet_width);
    let height = cell_height.min(sheet_height);
    if width == 0 || height == 0 {
        return Err(StashError::NoVisibleFrames { source_name: source.to_string() });
    }
    if (width, height) != (cell_width, cell_height) {
        log::warn!(
            "Sprite size {}x{} exceeds sheet {}x{}, clamped to {}x{}",
            cell_width,
            cell_height,
            sheet_width,
            sheet_height,
            width,
            height
        );
    }

    let visibility = bitmap.visibility(background);
    let pixels = bitmap.pixels();
    let mut states: Vec<StateSequence> = Vec::new();

    let mut y = 0;
    while y + height <= sheet_height {
        let mut sprites = Vec::new();
        let mut x = 0;
        while x + width <= sheet_width {
            let cell = pixels.view(x, y, width, height);
            if bounding_rect(&*cell, visibility).is_some() {
                sprites.push(Sprite::from_pixels(cell.to_image()));
            }
            x += width;
        }

        log::debug!("Row at y={} kept {} frame(s)", y, sprites.len());
        if !sprites.is_empty() {
            states.push(StateSequence::new(format!("State{}", states.len()), sprites));
        }
        y += height;
    }

    if states.is_empty() {
        return Err(StashError::NoVisibleFrames { source_name: source.to_string() });
    }

    let name = SpriteEntity::name_for_source(Path::new(source));
    let entity = SpriteEntity::new(name, source, width, height, states);
    log::debug!(
        "Sliced '{}' at {}x{}: {} state(s), {} sprite(s)",
        source,
        width,
        height,
        entity.states().len(),
        entity.sprite_count()
    );
    Ok(entity)
}

/// Decode a spritesheet file and slice it.
///
/// The entity's `source` is the path as given and its name is the file stem.
pub fn slice_file(
    path: &Path,
    cell_width: u32,
    cell_height: u32,
    background: Background,
) -> Result<SpriteEntity> {
    let bitmap = Bitmap::open(path)?;
    slice(&bitmap, cell_width, cell_height, &path.to_string_lossy(), background)
}

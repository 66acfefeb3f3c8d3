//! Overview rendering - lays an entity's states back out as a grid
//!
//! Each state becomes one row and its sprites run left to right, so the
//! picture shows exactly what survived slicing. Rows shorter than the longest
//! state are padded with transparency.

use image::{imageops, Rgba, RgbaImage};

use crate::models::SpriteEntity;

/// Transparent color used for padding
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Render every state of `entity` into one image.
///
/// Cells are `frame_width` x `frame_height`. Sprites without a pixel buffer
/// leave their cell transparent. An entity without sprites renders as a single
/// transparent pixel.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritestash::models::{Sprite, SpriteEntity, StateSequence};
/// use spritestash::overview::render_overview;
///
/// let frame = || Sprite::from_pixels(RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255])));
/// let states = vec![
///     StateSequence::new("State0", vec![frame(), frame(), frame()]),
///     StateSequence::new("State1", vec![frame()]),
/// ];
/// let entity = SpriteEntity::new("demo", "demo.png", 2, 2, states);
///
/// let sheet = render_overview(&entity);
/// assert_eq!(sheet.dimensions(), (6, 4));
/// ```
pub fn render_overview(entity: &SpriteEntity) -> RgbaImage {
    let columns = entity.max_state_len() as u32;
    let rows = entity.states().len() as u32;
    let (cell_w, cell_h) = (entity.frame_width(), entity.frame_height());

    if columns == 0 || rows == 0 || cell_w == 0 || cell_h == 0 {
        return RgbaImage::from_pixel(1, 1, TRANSPARENT);
    }

    let mut sheet = RgbaImage::from_pixel(columns * cell_w, rows * cell_h, TRANSPARENT);
    for (row, state) in entity.states().iter().enumerate() {
        for (col, sprite) in state.sprites().iter().enumerate() {
            let Some(pixels) = sprite.pixels() else {
                continue;
            };
            // Oversized buffers are cropped to the cell
            let w = pixels.width().min(cell_w);
            let h = pixels.height().min(cell_h);
            let cell = imageops::crop_imm(pixels, 0, 0, w, h).to_image();
            imageops::replace(
                &mut sheet,
                &cell,
                col as i64 * cell_w as i64,
                row as i64 * cell_h as i64,
            );
        }
    }

    sheet
}

/// Which state/sprite sits under pixel `(x, y)` of an overview image.
///
/// Used to turn a click on the overview into a selection. Returns `None` for
/// padding and for points outside the grid.
pub fn hit_test(entity: &SpriteEntity, x: u32, y: u32) -> Option<(usize, usize)> {
    let (cell_w, cell_h) = (entity.frame_width(), entity.frame_height());
    if cell_w == 0 || cell_h == 0 {
        return None;
    }
    let row = (y / cell_h) as usize;
    let col = (x / cell_w) as usize;
    let state = entity.states().get(row)?;
    (col < state.len()).then_some((row, col))
}

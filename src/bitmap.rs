//! Bitmap source: decoded spritesheet pixels plus per-pixel visibility
//!
//! Sheets are always held as RGBA8. Whether the file carried an alpha channel
//! is remembered, because sheets without one need a colour key to tell
//! background from content.

use image::{GenericImageView, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{Result, StashError};

/// How background pixels are recognised when looking for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Background {
    /// Alpha for sheets with an alpha channel, otherwise key on the sheet's
    /// top-left pixel colour
    #[default]
    Auto,
    /// Visible iff alpha > 0
    Alpha,
    /// Visible iff alpha > 0 and the colour differs from this RGB key
    Key([u8; 3]),
}

/// Error parsing a [`Background`] from text
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid background '{0}': expected 'auto', 'alpha' or a '#RRGGBB' colour")]
pub struct BackgroundParseError(pub String);

impl FromStr for Background {
    type Err = BackgroundParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "auto" => return Ok(Background::Auto),
            "alpha" => return Ok(Background::Alpha),
            _ => {}
        }

        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(BackgroundParseError(s.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| BackgroundParseError(s.to_string()))
        };
        Ok(Background::Key([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Auto => write!(f, "auto"),
            Background::Alpha => write!(f, "alpha"),
            Background::Key([r, g, b]) => write!(f, "#{:02X}{:02X}{:02X}", r, g, b),
        }
    }
}

impl TryFrom<String> for Background {
    type Error = BackgroundParseError;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Background> for String {
    fn from(value: Background) -> Self {
        value.to_string()
    }
}

/// Resolved visibility rule for one bitmap ([`Background::Auto`] already decided)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Alpha,
    Key([u8; 3]),
}

impl Visibility {
    pub fn is_visible(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, a] = pixel.0;
        match self {
            Visibility::Alpha => a > 0,
            Visibility::Key(key) => a > 0 && [r, g, b] != *key,
        }
    }
}

/// Axis-aligned pixel rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// Smallest rectangle enclosing every visible pixel of `view`.
///
/// Returns `None` when no pixel is visible (a zero-area rectangle), which is
/// how empty cells are recognised.
pub fn bounding_rect<I>(view: &I, visibility: Visibility) -> Option<Rect>
where
    I: GenericImageView<Pixel = Rgba<u8>>,
{
    let (width, height) = view.dimensions();
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0;
    let mut max_y = 0;
    let mut any = false;

    for y in 0..height {
        for x in 0..width {
            if visibility.is_visible(&view.get_pixel(x, y)) {
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }

    any.then(|| Rect {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// A decoded spritesheet
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
    has_alpha: bool,
    path: Option<PathBuf>,
}

impl Bitmap {
    /// Decode an image file. Missing or corrupt files are `SourceUnreadable`.
    pub fn open(path: &Path) -> Result<Self> {
        let decoded = image::open(path).map_err(|e| StashError::unreadable(path, e))?;
        let has_alpha = decoded.color().has_alpha();
        log::debug!(
            "Decoded '{}' ({}x{}, alpha: {})",
            path.display(),
            decoded.width(),
            decoded.height(),
            has_alpha
        );
        Ok(Self { pixels: decoded.to_rgba8(), has_alpha, path: Some(path.to_path_buf()) })
    }

    /// Wrap an in-memory buffer.
    pub fn from_rgba(pixels: RgbaImage, has_alpha: bool) -> Self {
        Self { pixels, has_alpha, path: None }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Path this bitmap was decoded from, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Decide the visibility rule for this bitmap.
    pub fn visibility(&self, background: Background) -> Visibility {
        match background {
            Background::Alpha => Visibility::Alpha,
            Background::Key(key) => Visibility::Key(key),
            Background::Auto if self.has_alpha => Visibility::Alpha,
            Background::Auto => {
                if self.width() == 0 || self.height() == 0 {
                    return Visibility::Alpha;
                }
                let [r, g, b, _] = self.pixels.get_pixel(0, 0).0;
                Visibility::Key([r, g, b])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_parse_background() {
        assert_eq!("auto".parse::<Background>(), Ok(Background::Auto));
        assert_eq!(" Alpha ".parse::<Background>(), Ok(Background::Alpha));
        assert_eq!("#FF00ff".parse::<Background>(), Ok(Background::Key([255, 0, 255])));
        assert_eq!("00ff00".parse::<Background>(), Ok(Background::Key([0, 255, 0])));
        assert!("#FFF".parse::<Background>().is_err());
        assert!("#GG0000".parse::<Background>().is_err());
        assert!("magenta".parse::<Background>().is_err());
    }

    #[test]
    fn test_background_display_roundtrip() {
        for bg in [Background::Auto, Background::Alpha, Background::Key([1, 171, 255])] {
            assert_eq!(bg.to_string().parse::<Background>(), Ok(bg));
        }
    }

    #[test]
    fn test_bounding_rect_empty_cell() {
        let img = RgbaImage::from_pixel(4, 4, CLEAR);
        assert_eq!(bounding_rect(&img, Visibility::Alpha), None);
    }

    #[test]
    fn test_bounding_rect_tight() {
        let mut img = RgbaImage::from_pixel(8, 8, CLEAR);
        img.put_pixel(2, 3, RED);
        img.put_pixel(5, 6, Rgba([0, 0, 0, 1]));
        let rect = bounding_rect(&img, Visibility::Alpha).unwrap();
        assert_eq!(rect, Rect { x: 2, y: 3, width: 4, height: 4 });
        assert_eq!(rect.area(), 16);
    }

    #[test]
    fn test_bounding_rect_on_sub_view() {
        let mut img = RgbaImage::from_pixel(8, 4, CLEAR);
        img.put_pixel(6, 1, RED);
        let left = img.view(0, 0, 4, 4);
        let right = img.view(4, 0, 4, 4);
        assert_eq!(bounding_rect(&*left, Visibility::Alpha), None);
        assert_eq!(
            bounding_rect(&*right, Visibility::Alpha),
            Some(Rect { x: 2, y: 1, width: 1, height: 1 })
        );
    }

    #[test]
    fn test_key_visibility_ignores_background_colour() {
        let magenta = Rgba([255, 0, 255, 255]);
        let mut img = RgbaImage::from_pixel(3, 3, magenta);
        let key = Visibility::Key([255, 0, 255]);
        assert_eq!(bounding_rect(&img, key), None);
        img.put_pixel(1, 1, RED);
        assert_eq!(bounding_rect(&img, key), Some(Rect { x: 1, y: 1, width: 1, height: 1 }));
    }

    #[test]
    fn test_auto_visibility_without_alpha_keys_top_left() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 1, RED);
        let bitmap = Bitmap::from_rgba(img, false);
        assert_eq!(bitmap.visibility(Background::Auto), Visibility::Key([10, 20, 30]));
        assert_eq!(bitmap.visibility(Background::Alpha), Visibility::Alpha);
    }

    #[test]
    fn test_auto_visibility_with_alpha() {
        let bitmap = Bitmap::from_rgba(RgbaImage::from_pixel(2, 2, RED), true);
        assert_eq!(bitmap.visibility(Background::Auto), Visibility::Alpha);
    }

    #[test]
    fn test_open_missing_file_is_unreadable() {
        let err = Bitmap::open(Path::new("does/not/exist.png")).unwrap_err();
        assert!(matches!(err, StashError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_open_corrupt_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = Bitmap::open(&path).unwrap_err();
        assert!(matches!(err, StashError::SourceUnreadable { .. }));
    }

    #[test]
    fn test_open_png_records_alpha() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sheet.png");
        RgbaImage::from_pixel(3, 2, RED).save(&path).unwrap();
        let bitmap = Bitmap::open(&path).unwrap();
        assert_eq!((bitmap.width(), bitmap.height()), (3, 2));
        assert!(bitmap.has_alpha());
        assert_eq!(bitmap.path(), Some(path.as_path()));
    }
}

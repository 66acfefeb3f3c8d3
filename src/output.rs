//! PNG output, input and sprite file naming

use image::imageops::FilterType;
use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::error::{Result, StashError};

/// Name of the metadata document inside an entity folder
pub const METADATA_FILE: &str = "metadata.json";

/// Save an RGBA image to a PNG file, creating parent directories as needed.
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| StashError::io(parent, e))?;
        }
    }

    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| StashError::Encode { path: path.to_path_buf(), source: e })
}

/// Decode an image file into RGBA. Missing or corrupt files are
/// `SourceUnreadable`.
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    image::open(path)
        .map(|img| img.to_rgba8())
        .map_err(|e| StashError::unreadable(path, e))
}

/// Scale image by integer factor using nearest-neighbor interpolation.
///
/// This preserves crisp pixel edges for pixel art. A factor of 0 or 1 returns
/// the image unchanged.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}

/// File name for a sprite: `state_{state}_sprite_{sprite}.png`
pub fn sprite_file_name(state: usize, sprite: usize) -> String {
    format!("state_{}_sprite_{}.png", state, sprite)
}

/// Full path of a sprite image inside an entity folder
pub fn sprite_path(folder: &Path, state: usize, sprite: usize) -> PathBuf {
    folder.join(sprite_file_name(state, sprite))
}

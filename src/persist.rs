//! Save/load round trip for sprite entities
//!
//! # Layout
//!
//! ```text
//! <root>/<entity name>/metadata.json
//! <root>/<entity name>/state_{i}_sprite_{j}.png
//! ```
//!
//! Saving writes every sprite's pixels to its own PNG, points the sprite's
//! `imageRef` at that file, writes the metadata document, then swaps each
//! in-memory buffer for one decoded from the written file. The entity stays
//! usable after saving and `load` of the written document reproduces it.
//!
//! Saving is staged: files are written and read back before the entity is
//! touched, so a failed save leaves the entity as it was.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StashError};
use crate::models::{MetadataDocument, SpriteEntity};
use crate::output::{load_rgba, save_png, sprite_path, METADATA_FILE};

/// Folder for an entity under an output root.
///
/// Path separators in the name are replaced so the folder stays directly
/// under `root`; an empty name maps to `unnamed`.
pub fn entity_folder(root: &Path, entity_name: &str) -> PathBuf {
    let mut name: String =
        entity_name.chars().map(|c| if c == '/' || c == '\\' { '_' } else { c }).collect();
    if name.trim().is_empty() || name == "." || name == ".." {
        name = "unnamed".to_string();
    }
    root.join(name)
}

/// Location of an entity's metadata document under an output root
pub fn metadata_path(root: &Path, entity_name: &str) -> PathBuf {
    entity_folder(root, entity_name).join(METADATA_FILE)
}

/// Save `entity` into `folder`, returning the metadata document's path.
///
/// # Errors
///
/// * `MissingPixels` if a sprite has no pixel buffer (nothing is written)
/// * `Io` / `Encode` if the folder or a file cannot be written
/// * `SourceUnreadable` if a written image cannot be read back
pub fn save(entity: &mut SpriteEntity, folder: &Path) -> Result<PathBuf> {
    for (i, state) in entity.states().iter().enumerate() {
        for (j, sprite) in state.sprites().iter().enumerate() {
            if sprite.pixels().is_none() {
                return Err(StashError::MissingPixels { state: i, sprite: j });
            }
        }
    }

    fs::create_dir_all(folder).map_err(|e| StashError::io(folder, e))?;

    let mut document = entity.to_document();
    let mut written = Vec::with_capacity(entity.sprite_count());
    for (i, state) in entity.states().iter().enumerate() {
        for (j, sprite) in state.sprites().iter().enumerate() {
            let path = sprite_path(folder, i, j);
            if let Some(pixels) = sprite.pixels() {
                save_png(pixels, &path)?;
            }
            document.states[i].sprites[j].image_ref = path.to_string_lossy().into_owned();
            written.push(path);
        }
    }

    let metadata = folder.join(METADATA_FILE);
    write_document(&document, &metadata)?;

    let reloaded = written.iter().map(|path| load_rgba(path)).collect::<Result<Vec<_>>>()?;

    let mut reloaded = reloaded.into_iter();
    for (state, record) in entity.states.iter_mut().zip(&document.states) {
        for (sprite, sprite_record) in state.sprites.iter_mut().zip(&record.sprites) {
            sprite.image_ref = sprite_record.image_ref.clone();
            sprite.pixels = reloaded.next();
        }
    }

    log::info!(
        "Sprite entity '{}' saved to {} ({} image(s))",
        entity.name(),
        folder.display(),
        written.len()
    );
    Ok(metadata)
}

fn write_document(document: &MetadataDocument, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(document)
        .map_err(|e| StashError::Metadata { path: path.to_path_buf(), source: e })?;
    fs::write(path, json).map_err(|e| StashError::io(path, e))
}

/// Load an entity from its metadata document, decoding every sprite image.
///
/// # Errors
///
/// * `MetadataNotFound` if `metadata_path` does not exist
/// * `Metadata` if the document cannot be parsed
/// * `SourceUnreadable` if any referenced image is missing or corrupt; no
///   partial entity is returned
pub fn load(metadata_path: &Path) -> Result<SpriteEntity> {
    if !metadata_path.exists() {
        return Err(StashError::MetadataNotFound { path: metadata_path.to_path_buf() });
    }

    let text = fs::read_to_string(metadata_path).map_err(|e| StashError::io(metadata_path, e))?;
    let document: MetadataDocument = serde_json::from_str(&text)
        .map_err(|e| StashError::Metadata { path: metadata_path.to_path_buf(), source: e })?;

    let base = metadata_path.parent().unwrap_or(Path::new(""));
    let mut entity = SpriteEntity::from_document(document);
    for state in entity.states.iter_mut() {
        for sprite in state.sprites.iter_mut() {
            let path = resolve_image_ref(base, &sprite.image_ref);
            sprite.pixels = Some(load_rgba(&path)?);
        }
    }

    log::info!(
        "Sprite entity '{}' loaded from {} ({} state(s), {} sprite(s))",
        entity.name(),
        metadata_path.display(),
        entity.states().len(),
        entity.sprite_count()
    );
    Ok(entity)
}

/// Like [`load`], but "nothing saved yet" is `Ok(None)` rather than an error.
pub fn try_load(metadata_path: &Path) -> Result<Option<SpriteEntity>> {
    match load(metadata_path) {
        Ok(entity) => Ok(Some(entity)),
        Err(err) if err.is_informational() => {
            log::info!("{}", err);
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

/// Resolve an `imageRef`.
///
/// References are stored as written. One that no longer exists is looked up
/// by file name next to the metadata document, so saved folders can be moved.
fn resolve_image_ref(base: &Path, image_ref: &str) -> PathBuf {
    let path = PathBuf::from(image_ref);
    if path.exists() {
        return path;
    }
    match path.file_name() {
        Some(file) => base.join(file),
        None => path,
    }
}

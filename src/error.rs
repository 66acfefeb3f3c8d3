//! Error types shared by slicing, navigation and persistence

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the SpriteStash core.
///
/// Nothing in the core retries. Every failure is handed back to the caller,
/// which keeps its previous entity and decides how to report the message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StashError {
    /// A spritesheet or sprite image is missing or cannot be decoded
    #[error("Cannot read image '{}': {reason}", path.display())]
    SourceUnreadable { path: PathBuf, reason: String },

    /// Frame width or height is zero
    #[error("Invalid sprite size {width}x{height}. Please enter valid dimensions.")]
    InvalidDimensions { width: u32, height: u32 },

    /// The requested state/sprite position does not exist in the active entity
    #[error("Invalid state or sprite index (state {state}, sprite {sprite})")]
    IndexOutOfRange { state: usize, sprite: usize },

    /// No saved metadata exists at the given location
    #[error("No saved sprite entity found at '{}'", path.display())]
    MetadataNotFound { path: PathBuf },

    /// Slicing produced no state because every cell was empty
    #[error("Spritesheet '{source_name}' has no visible frames at this sprite size")]
    NoVisibleFrames { source_name: String },

    /// A sprite has no pixel buffer to write
    #[error("Sprite {sprite} of state {state} has no pixel data to save")]
    MissingPixels { state: usize, sprite: usize },

    /// The metadata document could not be parsed or written
    #[error("Invalid metadata document '{}': {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A sprite image could not be encoded and written
    #[error("Cannot write image '{}': {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem error while saving or loading
    #[error("IO error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StashError {
    /// Whether this error only means "nothing to do" rather than a failure.
    ///
    /// A load request for an entity that was never saved is reported to the
    /// operator, but it is not fatal.
    pub fn is_informational(&self) -> bool {
        matches!(self, StashError::MetadataNotFound { .. })
    }

    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        StashError::SourceUnreadable { path: path.into(), reason: reason.to_string() }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StashError::Io { path: path.into(), source }
    }
}

/// Result alias for core operations
pub type Result<T> = std::result::Result<T, StashError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_not_found_is_informational() {
        let err = StashError::MetadataNotFound { path: PathBuf::from("out/Fire/metadata.json") };
        assert!(err.is_informational());
        assert!(err.to_string().contains("out/Fire/metadata.json"));
    }

    #[test]
    fn test_other_errors_are_not_informational() {
        let err = StashError::InvalidDimensions { width: 0, height: 32 };
        assert!(!err.is_informational());
        assert_eq!(err.to_string(), "Invalid sprite size 0x32. Please enter valid dimensions.");
    }

    #[test]
    fn test_unreadable_message_includes_reason() {
        let err = StashError::unreadable("sheet.png", "unexpected end of file");
        assert_eq!(err.to_string(), "Cannot read image 'sheet.png': unexpected end of file");
    }
}

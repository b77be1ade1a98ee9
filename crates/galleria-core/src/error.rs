//! Gallery errors.

use thiserror::Error;

/// Errors returned by gallery operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GalleryError {
    #[error("Gallery has no slides")]
    Empty,
    #[error("Slide index {index} out of range (gallery has {len} slides)")]
    SlideOutOfRange { index: usize, len: usize },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for GalleryError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Result type for gallery operations.
pub type GalleryResult<T> = Result<T, GalleryError>;

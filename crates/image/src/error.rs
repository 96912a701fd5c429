//! Error types for the image crate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur while processing a batch.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Input directory missing or not a directory
    #[error("The specified directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// Output format identifier is not in the format table
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Target dimensions are zero, negative or too large
    #[error("Invalid target dimensions {width}x{height}")]
    InvalidDimension {
        /// Requested width
        width: i64,
        /// Derived height
        height: i64,
    },

    /// File could not be read or decoded as an image
    #[error("Failed to decode {}: {}", .path.display(), .source)]
    Decode {
        /// File that failed
        path: PathBuf,
        /// Underlying codec error
        #[source]
        source: image::ImageError,
    },

    /// Source path has no file name to derive an output name from
    #[error("Cannot derive an output name from {}", .0.display())]
    InvalidPath(PathBuf),

    /// Codec rejected the raster
    #[error("Encoding error: {0}")]
    Encode(#[from] image::ImageError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Coarse classification of a failure, reported per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input directory missing
    DirectoryNotFound,
    /// Unknown output format
    UnsupportedFormat,
    /// Non-positive or overflowing dimensions
    InvalidDimension,
    /// Unreadable or corrupt input
    Decode,
    /// Encoder failure
    Encode,
    /// Filesystem failure
    Io,
}

impl ImageError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ImageError::DirectoryNotFound(_) => ErrorKind::DirectoryNotFound,
            ImageError::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            ImageError::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            ImageError::Decode { .. } => ErrorKind::Decode,
            ImageError::Encode(_) => ErrorKind::Encode,
            ImageError::InvalidPath(_) | ImageError::IoError(_) => ErrorKind::Io,
        }
    }
}

impl From<ImageError> for imgbatch_core::Error {
    fn from(err: ImageError) -> Self {
        use imgbatch_core::{Error, ErrorCode};

        match err {
            ImageError::DirectoryNotFound(path) => Error::directory_not_found(path),
            ImageError::UnsupportedFormat(format) => Error::unsupported_format(&format),
            ImageError::InvalidDimension { .. } => {
                Error::new(ErrorCode::InvalidDimension, err.to_string())
                    .with_suggestion("Use a positive target width")
            }
            ImageError::Decode { .. } => Error::new(ErrorCode::DecodeFailed, err.to_string()),
            ImageError::Encode(_) => Error::new(ErrorCode::EncodeFailed, err.to_string()),
            ImageError::InvalidPath(_) => Error::new(ErrorCode::InvalidPath, err.to_string()),
            ImageError::IoError(io) => Error::from(io),
        }
    }
}

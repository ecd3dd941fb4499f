//! Custom error types for refdump.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the refdump library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to write a dump file.
    #[error("failed to write dump to {path}: {source}")]
    DumpWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a dump file.
    #[error("failed to read dump from {path}: {source}")]
    DumpRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Dump length is not a whole number of elements.
    #[error("dump {path} is {len} bytes, not a multiple of the {width}-byte element width")]
    Misaligned { path: PathBuf, len: usize, width: usize },

    /// Candidate and reference dumps hold a different number of elements.
    #[error("length mismatch: candidate has {candidate} elements, reference has {reference}")]
    LengthMismatch { candidate: usize, reference: usize },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Shape mismatch in array operations.
    #[error("array shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

/// Result type alias for refdump operations.
pub type Result<T> = std::result::Result<T, Error>;

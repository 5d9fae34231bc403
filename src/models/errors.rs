//! Error types for the font editor core
//!
//! Only malformed input and I/O failures are errors. Boundary conditions of
//! normal interaction (undo at the start, pasting an empty clipboard, cutting
//! a missing slot) are reported as [`NoOpReason`](crate::models::NoOpReason)
//! instead.

use thiserror::Error;

/// Top-level error type for font editing operations
#[derive(Debug, Error)]
pub enum FontError {
    /// Document bytes could not be parsed as a font document
    #[error("Malformed font document: {0}")]
    MalformedDocument(String),

    /// Radical data is not a mapping of names to fragment lists
    #[error("Malformed radical data: {0}")]
    MalformedRadicals(String),

    /// Encoded raster payload is not decodable
    #[error("Invalid raster payload: {0}")]
    InvalidRaster(String),

    /// Raster does not match the configured drawing surface
    #[error("Raster size {actual_width}x{actual_height} does not match surface size {expected_width}x{expected_height}")]
    RasterSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// Document could not be encoded
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Persistent store unavailable or rejected the write
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem error from a native store
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FontError>;

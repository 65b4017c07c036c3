//! Error types for the PDF writer.

use std::path::PathBuf;

/// Result type alias for writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building or serializing a document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error while reading assets or writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Image data could not be decoded or is unsupported
    #[error("Image error: {0}")]
    Image(String),

    /// Font data could not be parsed
    #[error("Font error: {0}")]
    Font(String),

    /// A font file referenced by a family does not exist
    #[error("Font file not found: {}", .0.display())]
    FontFileMissing(PathBuf),

    /// Color string is not a 6-digit hex value
    #[error("Invalid color '{0}': expected 6 hex digits")]
    Color(String),

    /// `set_font` was called with a family that was never registered
    #[error("Unknown font family: {0}")]
    UnknownFontFamily(String),
}

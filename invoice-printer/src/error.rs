//! Errors raised by the invoice printer.

use std::path::PathBuf;

/// Result type alias for invoice operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is terminal for the call that raised it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document, item or label input has the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Font option is neither an existing file nor a known builtin font
    #[error("Font file not found for {0}")]
    FontFileNotFound(String),

    #[error("Logotype file not found at {}", .0.display())]
    LogoFileNotFound(PathBuf),

    #[error("Stamp file not found at {}", .0.display())]
    StampFileNotFound(PathBuf),

    /// Failure inside the PDF writer
    #[error(transparent)]
    Pdf(#[from] pdf_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

//! Error types
//!
//! Unified error handling for the extraction pipeline.

use thiserror::Error;

/// Errors surfaced by the extraction pipeline
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Uploaded image bytes are not a decodable bitmap
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// PDF bytes could not be converted to page bitmaps
    #[error("Failed to rasterize PDF: {0}")]
    Rasterize(String),

    /// The OCR engine could not be invoked or exited with an error
    #[error("OCR failed: {0}")]
    Recognition(String),

    /// Declared media type is not one of the recognized upload formats
    #[error("Unsupported media type: {0}")]
    UnsupportedFormat(String),

    /// IO error (temp staging, scratch space)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, ExtractError>;

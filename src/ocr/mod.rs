//! OCR
//!
//! Capability interface over the external OCR engine, plus the tesseract
//! implementation. The engine turns a bitmap of text into a string; all
//! normalization happens in the extractors above this layer.

mod tesseract;

pub use tesseract::TesseractRecognizer;

use image::DynamicImage;

use crate::error::Result;

/// Text recognition capability
///
/// Implemented by the tesseract shell-out in production and by deterministic
/// fakes in tests.
pub trait TextRecognizer: Send + Sync {
    /// Recognize text in a bitmap.
    ///
    /// Returns the engine's raw output; a bitmap with no discernible text
    /// yields an empty string, not an error.
    fn recognize(&self, bitmap: &DynamicImage) -> Result<String>;

    /// Check whether the engine can be invoked at all.
    fn is_available(&self) -> bool;
}

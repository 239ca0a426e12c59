//! Image text extraction
//!
//! Decodes an uploaded bitmap, optionally converts it to grayscale, and runs
//! it through the OCR engine. Grayscale preprocessing is on by default for
//! direct uploads; it helps the engine on color scans.

use std::sync::Arc;

use image::DynamicImage;

use crate::error::{ExtractError, Result};
use crate::ocr::TextRecognizer;

/// Configuration for image extraction
#[derive(Debug, Clone)]
pub struct ImageExtractorConfig {
    /// Convert the bitmap to grayscale before OCR
    pub grayscale: bool,
}

impl Default for ImageExtractorConfig {
    fn default() -> Self {
        Self { grayscale: true }
    }
}

/// Extracts lowercased text from an uploaded image
pub struct ImageTextExtractor {
    recognizer: Arc<dyn TextRecognizer>,
    config: ImageExtractorConfig,
}

impl ImageTextExtractor {
    pub fn new(recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self::with_config(recognizer, ImageExtractorConfig::default())
    }

    pub fn with_config(recognizer: Arc<dyn TextRecognizer>, config: ImageExtractorConfig) -> Self {
        Self { recognizer, config }
    }

    /// Decode `bytes` and OCR the bitmap.
    ///
    /// The recognized text is lowercased before returning; that is the only
    /// normalization performed at this layer. An image with no text yields
    /// an empty string, not an error.
    pub fn extract(&self, bytes: &[u8]) -> Result<String> {
        let bitmap =
            image::load_from_memory(bytes).map_err(|e| ExtractError::Decode(e.to_string()))?;

        let bitmap = if self.config.grayscale {
            DynamicImage::ImageLuma8(bitmap.to_luma8())
        } else {
            bitmap
        };

        let text = self.recognizer.recognize(&bitmap)?;
        tracing::debug!("Recognized {} chars from image upload", text.len());

        Ok(text.to_lowercase())
    }
}

//! PDF text extraction
//!
//! Stages the uploaded document in a temporary file, rasterizes it page by
//! page, and OCRs each page in order. The staged file and the rendered page
//! images are removed when extraction finishes, on success and on failure.

use std::sync::Arc;

use image::DynamicImage;

use crate::error::Result;
use crate::ocr::TextRecognizer;
use crate::raster::PageRasterizer;

/// Configuration for PDF extraction
#[derive(Debug, Clone)]
pub struct PdfExtractorConfig {
    /// Convert rendered pages to grayscale before OCR.
    ///
    /// Off by default: rendered pages go to the engine as-is, unlike direct
    /// image uploads.
    pub grayscale: bool,
}

impl Default for PdfExtractorConfig {
    fn default() -> Self {
        Self { grayscale: false }
    }
}

/// Extracts lowercased text from an uploaded PDF
pub struct PdfTextExtractor {
    rasterizer: Arc<dyn PageRasterizer>,
    recognizer: Arc<dyn TextRecognizer>,
    config: PdfExtractorConfig,
}

impl PdfTextExtractor {
    pub fn new(rasterizer: Arc<dyn PageRasterizer>, recognizer: Arc<dyn TextRecognizer>) -> Self {
        Self::with_config(rasterizer, recognizer, PdfExtractorConfig::default())
    }

    pub fn with_config(
        rasterizer: Arc<dyn PageRasterizer>,
        recognizer: Arc<dyn TextRecognizer>,
        config: PdfExtractorConfig,
    ) -> Self {
        Self {
            rasterizer,
            recognizer,
            config,
        }
    }

    /// Stage `pdf_bytes` on disk, rasterize, and OCR every page.
    ///
    /// Page texts are concatenated in page order, each followed by a newline,
    /// and the whole result is lowercased.
    pub fn extract(&self, pdf_bytes: &[u8]) -> Result<String> {
        let staged = tempfile::Builder::new()
            .prefix("scangrep-")
            .suffix(".pdf")
            .tempfile()?;
        std::fs::write(staged.path(), pdf_bytes)?;
        tracing::debug!("Staged {} byte PDF at {:?}", pdf_bytes.len(), staged.path());

        let pages = self.rasterizer.rasterize(staged.path())?;
        tracing::info!("Rasterized PDF into {} page(s)", pages.len());

        let mut full_text = String::new();
        for (index, page) in pages.iter().enumerate() {
            let page_text = if self.config.grayscale {
                let gray = DynamicImage::ImageLuma8(page.to_luma8());
                self.recognizer.recognize(&gray)?
            } else {
                self.recognizer.recognize(page)?
            };
            tracing::debug!("Page {}: recognized {} chars", index + 1, page_text.len());
            full_text.push_str(&page_text);
            full_text.push('\n');
        }

        Ok(full_text.to_lowercase())
    }
}

//! Text extraction
//!
//! Extractors that turn an upload into a single lowercased text blob:
//! `ImageTextExtractor` for direct image uploads, `PdfTextExtractor` for
//! PDFs rendered page by page through the external rasterizer.

mod image;
mod pdf;

pub use self::image::{ImageExtractorConfig, ImageTextExtractor};
pub use self::pdf::{PdfExtractorConfig, PdfTextExtractor};

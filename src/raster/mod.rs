//! Rasterization
//!
//! Capability interface over the external PDF rasterizer, plus the poppler
//! implementation. The rasterizer converts a PDF into an ordered sequence of
//! page bitmaps suitable for OCR.

mod poppler;

pub use poppler::PopplerRasterizer;

use std::path::Path;

use image::DynamicImage;

use crate::error::Result;

/// PDF page rendering capability
///
/// Implemented by the pdftoppm shell-out in production and by deterministic
/// fakes in tests.
pub trait PageRasterizer: Send + Sync {
    /// Render every page of the PDF at `pdf` into a bitmap, in page order.
    fn rasterize(&self, pdf: &Path) -> Result<Vec<DynamicImage>>;

    /// Check whether the rasterizer can be invoked at all.
    fn is_available(&self) -> bool;
}

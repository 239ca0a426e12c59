//! Poppler rasterizer
//!
//! Shells out to pdftoppm to render each PDF page as a PNG in a scoped
//! output directory, then decodes the rendered pages back into bitmaps in
//! page order.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::DynamicImage;

use crate::config::RasterConfig;
use crate::error::{ExtractError, Result};

use super::PageRasterizer;

/// PDF page rendering via the pdftoppm executable
pub struct PopplerRasterizer {
    executable: PathBuf,
    dpi: Option<u32>,
}

impl PopplerRasterizer {
    pub fn new(config: &RasterConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            dpi: config.dpi,
        }
    }
}

impl PageRasterizer for PopplerRasterizer {
    fn rasterize(&self, pdf: &Path) -> Result<Vec<DynamicImage>> {
        // Output dir is removed on drop, on every exit path
        let out_dir = tempfile::tempdir()?;
        let prefix = out_dir.path().join("page");

        let mut command = Command::new(&self.executable);
        command.arg("-png");
        if let Some(dpi) = self.dpi {
            command.arg("-r").arg(dpi.to_string());
        }
        command.arg(pdf).arg(&prefix);

        let output = command.output().map_err(|e| {
            ExtractError::Rasterize(format!(
                "Failed to run {}: {}",
                self.executable.display(),
                e
            ))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Rasterize(format!(
                "pdftoppm failed: {}",
                stderr.trim()
            )));
        }

        // pdftoppm names pages `page-1.png`, `page-2.png`, ... zero-padded
        // for larger documents; order by the parsed page number rather than
        // by file name.
        let mut pages: Vec<(u32, PathBuf)> = Vec::new();
        for entry in std::fs::read_dir(out_dir.path())? {
            let path = entry?.path();
            if path.extension().map(|ext| ext == "png").unwrap_or(false) {
                if let Some(number) = page_number(&path) {
                    pages.push((number, path));
                }
            }
        }
        pages.sort_by_key(|(number, _)| *number);

        if pages.is_empty() {
            return Err(ExtractError::Rasterize(
                "pdftoppm produced no page images".to_string(),
            ));
        }

        tracing::debug!("Rendered {} page(s) from {}", pages.len(), pdf.display());

        let mut bitmaps = Vec::with_capacity(pages.len());
        for (_, path) in pages {
            let bitmap = image::open(&path).map_err(|e| {
                ExtractError::Rasterize(format!("Failed to decode rendered page: {}", e))
            })?;
            bitmaps.push(bitmap);
        }

        Ok(bitmaps)
    }

    fn is_available(&self) -> bool {
        Command::new(&self.executable).arg("-v").output().is_ok()
    }
}

/// Parse the page number from a `page-N.png` file name.
fn page_number(path: &Path) -> Option<u32> {
    path.file_stem()?
        .to_str()?
        .rsplit('-')
        .next()?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing_engine() -> PopplerRasterizer {
        PopplerRasterizer::new(&RasterConfig {
            executable: PathBuf::from("/nonexistent/pdftoppm"),
            dpi: None,
        })
    }

    #[test]
    fn test_page_number_parsing() {
        assert_eq!(page_number(Path::new("/tmp/out/page-1.png")), Some(1));
        assert_eq!(page_number(Path::new("/tmp/out/page-007.png")), Some(7));
        assert_eq!(page_number(Path::new("/tmp/out/page-12.png")), Some(12));
        assert_eq!(page_number(Path::new("/tmp/out/cover.png")), None);
    }

    #[test]
    fn test_missing_executable_is_unavailable() {
        assert!(!missing_engine().is_available());
    }

    #[test]
    fn test_missing_executable_maps_to_rasterize_error() {
        let result = missing_engine().rasterize(Path::new("input.pdf"));
        assert!(matches!(result, Err(ExtractError::Rasterize(_))));
    }
}

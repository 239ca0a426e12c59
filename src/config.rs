//! Configuration
//!
//! Locations and knobs for the external OCR and rasterization tools, loaded
//! from the environment at startup. The pipeline never reads ambient
//! globals; these values are passed into the recognizer and rasterizer
//! constructors, so tests can inject fake paths.

use std::env;
use std::path::PathBuf;

/// OCR engine configuration
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract executable; a bare name resolves via PATH
    pub executable: PathBuf,
    /// Language code passed to the engine as `-l`
    pub language: String,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("tesseract"),
            language: "eng".to_string(),
        }
    }
}

/// PDF rasterizer configuration
#[derive(Debug, Clone)]
pub struct RasterConfig {
    /// pdftoppm executable; a bare name resolves via PATH
    pub executable: PathBuf,
    /// Render resolution override; `None` keeps the engine's default
    pub dpi: Option<u32>,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("pdftoppm"),
            dpi: None,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub raster: RasterConfig,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Recognized variables: `SCANGREP_TESSERACT`, `SCANGREP_TESSERACT_LANG`,
    /// `SCANGREP_PDFTOPPM`, `SCANGREP_DPI`. Unset variables fall back to
    /// defaults; a malformed DPI is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = env::var("SCANGREP_TESSERACT") {
            config.ocr.executable = PathBuf::from(path);
        }
        if let Ok(lang) = env::var("SCANGREP_TESSERACT_LANG") {
            config.ocr.language = lang;
        }
        if let Ok(path) = env::var("SCANGREP_PDFTOPPM") {
            config.raster.executable = PathBuf::from(path);
        }
        if let Ok(dpi) = env::var("SCANGREP_DPI") {
            match dpi.parse::<u32>() {
                Ok(parsed) => config.raster.dpi = Some(parsed),
                Err(_) => tracing::warn!("Ignoring malformed SCANGREP_DPI value: {}", dpi),
            }
        }

        config
    }
}

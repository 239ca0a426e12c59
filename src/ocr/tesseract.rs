//! Tesseract recognizer
//!
//! Shells out to the tesseract executable. The bitmap is staged as a PNG in
//! a scoped scratch directory and the recognized text is read from stdout.

use std::path::PathBuf;
use std::process::Command;

use image::DynamicImage;

use crate::config::OcrConfig;
use crate::error::{ExtractError, Result};

use super::TextRecognizer;

/// OCR via the tesseract executable
pub struct TesseractRecognizer {
    executable: PathBuf,
    language: String,
}

impl TesseractRecognizer {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            executable: config.executable.clone(),
            language: config.language.clone(),
        }
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, bitmap: &DynamicImage) -> Result<String> {
        // Scratch dir is removed on drop, on every exit path
        let scratch = tempfile::tempdir()?;
        let input_path = scratch.path().join("input.png");

        bitmap
            .save(&input_path)
            .map_err(|e| ExtractError::Recognition(format!("Failed to write OCR input: {}", e)))?;

        let output = Command::new(&self.executable)
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .output()
            .map_err(|e| {
                ExtractError::Recognition(format!(
                    "Failed to run {}: {}",
                    self.executable.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Recognition(format!(
                "Tesseract failed: {}",
                stderr.trim()
            )));
        }

        tracing::debug!("Tesseract produced {} bytes of text", output.stdout.len());

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn is_available(&self) -> bool {
        Command::new(&self.executable)
            .arg("--version")
            .output()
            .is_ok()
    }
}

//! Session orchestration
//!
//! One session handles one upload: validate the declared media type, route
//! to the matching extractor, locate the phrase, and hand the outcome to a
//! report sink. Nothing is retained between invocations.

use std::sync::Arc;

use crate::config::Config;
use crate::error::{ExtractError, Result};
use crate::extract::{ImageTextExtractor, PdfTextExtractor};
use crate::ocr::TesseractRecognizer;
use crate::raster::PopplerRasterizer;
use crate::report::{ReportSink, SearchReport};
use crate::search::{locate_phrase, PhraseMatch};

/// An uploaded document awaiting processing
#[derive(Debug, Clone)]
pub struct Upload {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl Upload {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }
}

/// Media types the pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Png,
    Jpeg,
    Pdf,
}

impl UploadFormat {
    /// Map a declared media type onto a pipeline route.
    ///
    /// `image/jpg` is accepted as an alias for `image/jpeg`; browsers and
    /// older upload clients still emit it.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "application/pdf" => Some(Self::Pdf),
            _ => None,
        }
    }
}

/// Runs one upload through extraction and phrase location
pub struct Session {
    image: ImageTextExtractor,
    pdf: PdfTextExtractor,
}

impl Session {
    pub fn new(image: ImageTextExtractor, pdf: PdfTextExtractor) -> Self {
        Self { image, pdf }
    }

    /// Build a session wired to the configured external executables.
    pub fn from_config(config: &Config) -> Self {
        let recognizer = Arc::new(TesseractRecognizer::new(&config.ocr));
        let rasterizer = Arc::new(PopplerRasterizer::new(&config.raster));
        Self::new(
            ImageTextExtractor::new(recognizer.clone()),
            PdfTextExtractor::new(rasterizer, recognizer),
        )
    }

    /// Extract text from the upload and locate `phrase` in it.
    ///
    /// The media type is checked before any extraction work happens; an
    /// unsupported type never reaches the OCR engine.
    pub fn process(&self, upload: &Upload, phrase: &str) -> Result<PhraseMatch> {
        let format = UploadFormat::from_mime(&upload.mime_type)
            .ok_or_else(|| ExtractError::UnsupportedFormat(upload.mime_type.clone()))?;

        tracing::info!(
            "Processing {} byte {:?} upload, phrase {:?}",
            upload.bytes.len(),
            format,
            phrase
        );

        let text = match format {
            UploadFormat::Png | UploadFormat::Jpeg => self.image.extract(&upload.bytes)?,
            UploadFormat::Pdf => self.pdf.extract(&upload.bytes)?,
        };

        Ok(locate_phrase(&text, phrase))
    }

    /// Process the upload and deliver the outcome to `sink`.
    ///
    /// Returns whether the phrase was found. Failures are handed to the
    /// sink before propagating, so the sink sees every outcome.
    pub fn run(&self, upload: &Upload, phrase: &str, sink: &mut dyn ReportSink) -> Result<bool> {
        match self.process(upload, phrase) {
            Ok(outcome) => {
                let report = SearchReport::new(phrase, &outcome);
                sink.deliver(&report);
                Ok(report.found)
            }
            Err(err) => {
                sink.fail(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::TextRecognizer;
    use crate::raster::PageRasterizer;
    use image::DynamicImage;
    use std::io::Cursor;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fake engine that returns a canned string and counts invocations.
    struct CountingRecognizer {
        text: String,
        calls: AtomicUsize,
    }

    impl CountingRecognizer {
        fn new(text: &str) -> Self {
            Self {
                text: text.to_string(),
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl TextRecognizer for CountingRecognizer {
        fn recognize(&self, _bitmap: &DynamicImage) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.text.clone())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    struct CountingRasterizer {
        pages: u32,
        calls: AtomicUsize,
    }

    impl CountingRasterizer {
        fn new(pages: u32) -> Self {
            Self {
                pages,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl PageRasterizer for CountingRasterizer {
        fn rasterize(&self, _pdf: &Path) -> Result<Vec<DynamicImage>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..self.pages)
                .map(|_| DynamicImage::new_rgb8(4, 4))
                .collect())
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        reports: Vec<SearchReport>,
        failures: Vec<String>,
    }

    impl ReportSink for RecordingSink {
        fn deliver(&mut self, report: &SearchReport) {
            self.reports.push(report.clone());
        }

        fn fail(&mut self, err: &ExtractError) {
            self.failures.push(err.to_string());
        }
    }

    fn png_bytes() -> Vec<u8> {
        let bitmap = DynamicImage::ImageRgb8(image::RgbImage::new(8, 8));
        let mut bytes = Vec::new();
        bitmap
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn fake_session(text: &str, pages: u32) -> (Session, Arc<CountingRecognizer>, Arc<CountingRasterizer>) {
        let recognizer = Arc::new(CountingRecognizer::new(text));
        let rasterizer = Arc::new(CountingRasterizer::new(pages));
        let session = Session::new(
            ImageTextExtractor::new(recognizer.clone()),
            PdfTextExtractor::new(rasterizer.clone(), recognizer.clone()),
        );
        (session, recognizer, rasterizer)
    }

    #[test]
    fn test_from_mime_accepts_supported_types() {
        assert_eq!(UploadFormat::from_mime("image/png"), Some(UploadFormat::Png));
        assert_eq!(UploadFormat::from_mime("image/jpeg"), Some(UploadFormat::Jpeg));
        assert_eq!(UploadFormat::from_mime("image/jpg"), Some(UploadFormat::Jpeg));
        assert_eq!(UploadFormat::from_mime("application/pdf"), Some(UploadFormat::Pdf));
        assert_eq!(UploadFormat::from_mime("IMAGE/PNG"), Some(UploadFormat::Png));
    }

    #[test]
    fn test_from_mime_rejects_everything_else() {
        assert_eq!(UploadFormat::from_mime("text/plain"), None);
        assert_eq!(UploadFormat::from_mime("application/msword"), None);
        assert_eq!(UploadFormat::from_mime(""), None);
    }

    #[test]
    fn test_unsupported_type_rejected_before_extraction() {
        let (session, recognizer, rasterizer) = fake_session("never used", 1);
        let upload = Upload::new(b"hello world".to_vec(), "text/plain");

        let result = session.process(&upload, "hello");
        match result {
            Err(ExtractError::UnsupportedFormat(mime)) => assert_eq!(mime, "text/plain"),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 0);
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_image_upload_routes_to_image_extractor() {
        let (session, recognizer, rasterizer) = fake_session("John Smith\nJane Doe", 1);
        let upload = Upload::new(png_bytes(), "image/png");

        let outcome = session.process(&upload, "jane doe").unwrap();
        assert_eq!(outcome.positions, vec![3]);
        assert_eq!(outcome.matched_line.as_deref(), Some("jane doe"));
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_pdf_upload_routes_to_pdf_extractor() {
        let (session, recognizer, rasterizer) = fake_session("The Quick Brown Fox", 2);
        let upload = Upload::new(b"%PDF-1.4".to_vec(), "application/pdf");

        let outcome = session.process(&upload, "quick brown").unwrap();
        assert_eq!(outcome.positions, vec![2, 6]);
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(recognizer.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_run_delivers_report_and_signals_found() {
        let (session, _, _) = fake_session("Jane Doe", 0);
        let upload = Upload::new(png_bytes(), "image/png");
        let mut sink = RecordingSink::default();

        let found = session.run(&upload, "jane doe", &mut sink).unwrap();
        assert!(found);
        assert_eq!(sink.reports.len(), 1);
        assert_eq!(sink.reports[0].positions, vec![1]);
        assert!(sink.failures.is_empty());
    }

    #[test]
    fn test_run_signals_not_found() {
        let (session, _, _) = fake_session("abc def", 0);
        let upload = Upload::new(png_bytes(), "image/png");
        let mut sink = RecordingSink::default();

        let found = session.run(&upload, "xyz", &mut sink).unwrap();
        assert!(!found);
        assert!(!sink.reports[0].found);
        assert!(sink.reports[0].matched_line.is_none());
    }

    #[test]
    fn test_run_hands_failures_to_the_sink() {
        let (session, _, _) = fake_session("never used", 0);
        let upload = Upload::new(b"spreadsheet".to_vec(), "application/vnd.ms-excel");
        let mut sink = RecordingSink::default();

        let result = session.run(&upload, "jane doe", &mut sink);
        assert!(result.is_err());
        assert!(sink.reports.is_empty());
        assert_eq!(sink.failures.len(), 1);
        assert!(sink.failures[0].contains("application/vnd.ms-excel"));
    }
}

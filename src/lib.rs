//! Scangrep Library
//!
//! Finds a name or phrase in text OCR'd out of an uploaded image or PDF and
//! reports the 1-based word-sequence positions plus the first line the
//! phrase appears in. The CLI binary is in main.rs.
//!
//! # Modules
//!
//! - `config`: Executable paths and engine options, loaded from the environment
//! - `error`: Unified pipeline error type
//! - `ocr`: Text recognition capability (tesseract)
//! - `raster`: PDF page rendering capability (poppler's pdftoppm)
//! - `extract`: Per-format text extraction (image, PDF)
//! - `search`: Phrase location over extracted text
//! - `session`: Upload routing and pipeline orchestration
//! - `report`: Terminal and JSON report sinks

pub mod config;
pub mod error;
pub mod extract;
pub mod ocr;
pub mod raster;
pub mod report;
pub mod search;
pub mod session;

pub use config::Config;
pub use error::{ExtractError, Result};
pub use search::{locate_phrase, PhraseMatch};
pub use session::{Session, Upload, UploadFormat};

//! Scangrep CLI
//!
//! Thin shell over the library pipeline: reads the file, resolves its media
//! type, runs the session, and exits 0 when the phrase was found, 1 when it
//! was not, 2 when the pipeline failed.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scangrep::config::Config;
use scangrep::ocr::{TesseractRecognizer, TextRecognizer};
use scangrep::raster::{PageRasterizer, PopplerRasterizer};
use scangrep::report::{JsonReport, ReportSink, TerminalReport};
use scangrep::session::{Session, Upload};

#[derive(Parser)]
#[command(name = "scangrep")]
#[command(about = "Find a name in scanned images and PDFs via OCR")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search an image or PDF for a name or phrase
    Find {
        /// Image or PDF file to scan
        file: PathBuf,
        /// Name or phrase to look for
        phrase: String,
        /// Declared media type, overriding the file-extension guess
        #[arg(long)]
        media_type: Option<String>,
        /// Emit the report as JSON instead of terminal lines
        #[arg(long)]
        json: bool,
    },
    /// Check that the configured OCR and rasterizer executables respond
    Doctor,
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scangrep=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    let cli = Cli::parse();
    match cli.command {
        Commands::Find {
            file,
            phrase,
            media_type,
            json,
        } => find(&config, &file, &phrase, media_type, json),
        Commands::Doctor => doctor(&config),
    }
}

fn find(
    config: &Config,
    file: &Path,
    phrase: &str,
    media_type: Option<String>,
    json: bool,
) -> ExitCode {
    let read = std::fs::read(file).with_context(|| format!("Cannot read {}", file.display()));
    let bytes = match read {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("⚠️ {e:#}");
            return ExitCode::from(2);
        }
    };

    let mime = media_type
        .or_else(|| mime_guess::from_path(file).first_raw().map(str::to_string))
        .unwrap_or_else(|| "application/octet-stream".to_string());
    tracing::debug!("Resolved {} as {}", file.display(), mime);

    let session = Session::from_config(config);
    let upload = Upload::new(bytes, mime);

    let mut sink: Box<dyn ReportSink> = if json {
        Box::new(JsonReport)
    } else {
        Box::new(TerminalReport)
    };

    match session.run(&upload, phrase, sink.as_mut()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        // The sink already surfaced the error text.
        Err(_) => ExitCode::from(2),
    }
}

fn doctor(config: &Config) -> ExitCode {
    println!("\n🔍 Checking external tools...\n");

    let recognizer = TesseractRecognizer::new(&config.ocr);
    let rasterizer = PopplerRasterizer::new(&config.raster);

    let mut all_good = true;

    if recognizer.is_available() {
        println!("  🟢 {} responds (OCR engine)", config.ocr.executable.display());
    } else {
        println!(
            "  🔴 {} did not respond (OCR engine)",
            config.ocr.executable.display()
        );
        all_good = false;
    }

    if rasterizer.is_available() {
        println!(
            "  🟢 {} responds (PDF rasterizer)",
            config.raster.executable.display()
        );
    } else {
        println!(
            "  🔴 {} did not respond (PDF rasterizer)",
            config.raster.executable.display()
        );
        all_good = false;
    }

    println!();
    if all_good {
        println!("✅ All checks passed! scangrep is ready.");
        ExitCode::SUCCESS
    } else {
        println!("❌ Some checks failed! Install the missing tools or point SCANGREP_TESSERACT / SCANGREP_PDFTOPPM at them.");
        ExitCode::from(2)
    }
}

//! Report rendering
//!
//! The pipeline never prints. It hands a [`SearchReport`] to a
//! [`ReportSink`], and the sink decides how the outcome reaches the user.

use serde::Serialize;

use crate::error::ExtractError;
use crate::search::PhraseMatch;

/// User-facing outcome of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub phrase: String,
    pub found: bool,
    pub positions: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_line: Option<String>,
}

impl SearchReport {
    pub fn new(phrase: &str, outcome: &PhraseMatch) -> Self {
        Self {
            phrase: phrase.to_string(),
            found: outcome.found(),
            positions: outcome.positions.clone(),
            matched_line: outcome.matched_line.clone(),
        }
    }
}

/// Destination for search outcomes
pub trait ReportSink {
    fn deliver(&mut self, report: &SearchReport);
    fn fail(&mut self, err: &ExtractError);
}

/// Renders the report as human-readable terminal lines
pub struct TerminalReport;

impl ReportSink for TerminalReport {
    fn deliver(&mut self, report: &SearchReport) {
        if report.found {
            println!("✅ Name '{}' found in the document.", report.phrase);
            println!("🔢 Word sequence position(s): {:?}", report.positions);
            if let Some(line) = &report.matched_line {
                println!("📌 Name appears in this line: \"{line}\"");
            }
        } else {
            println!("❌ Name '{}' not found in the document.", report.phrase);
        }
    }

    fn fail(&mut self, err: &ExtractError) {
        eprintln!("⚠️ {err}");
    }
}

/// Renders the report as pretty-printed JSON on stdout
///
/// Failures also land on stdout, as a JSON error object, so a consumer
/// parsing the stream always gets exactly one document per invocation.
/// The exit code still tells errors apart from not-found.
pub struct JsonReport;

impl ReportSink for JsonReport {
    fn deliver(&mut self, report: &SearchReport) {
        match serde_json::to_string_pretty(report) {
            Ok(body) => println!("{body}"),
            Err(e) => eprintln!("⚠️ Failed to encode report: {e}"),
        }
    }

    fn fail(&mut self, err: &ExtractError) {
        println!("{}", serde_json::json!({ "error": err.to_string() }));
    }
}

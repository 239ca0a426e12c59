//! Phrase location
//!
//! Finds every occurrence of a phrase in extracted text. Two independent
//! scans run over the same text: a token scan that reports 1-based word
//! positions, and a line scan that reports the first line containing the
//! phrase as a substring.
//!
//! The scans deliberately disagree at the edges. A phrase glued to
//! punctuation ("acme,jane doe") is visible to the line scan but not the
//! token scan; a phrase split across a line break is visible to the token
//! scan but not the line scan. `found` is driven by the token scan alone.

use serde::Serialize;

/// Outcome of scanning extracted text for a phrase
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhraseMatch {
    /// 1-based word positions where the phrase starts
    pub positions: Vec<usize>,
    /// First line containing the phrase as a substring, trimmed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_line: Option<String>,
}

impl PhraseMatch {
    /// Whether the phrase occurred at least once as a word sequence
    pub fn found(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Locate `phrase` in `text`.
///
/// Both inputs are compared case-insensitively. The token scan splits both
/// on whitespace and slides a window of the phrase's width over the text
/// tokens, recording the 1-based index of every window whose tokens all
/// match. An empty phrase has no tokens and therefore no positions.
pub fn locate_phrase(text: &str, phrase: &str) -> PhraseMatch {
    let needle = phrase.to_lowercase();
    let haystack = text.to_lowercase();

    let phrase_tokens: Vec<&str> = needle.split_whitespace().collect();
    let text_tokens: Vec<&str> = haystack.split_whitespace().collect();

    let mut positions = Vec::new();
    if !phrase_tokens.is_empty() {
        for (i, window) in text_tokens.windows(phrase_tokens.len()).enumerate() {
            if window == phrase_tokens.as_slice() {
                positions.push(i + 1);
            }
        }
    }

    let matched_line = haystack
        .split('\n')
        .find(|line| line.contains(&needle))
        .map(|line| line.trim().to_string());

    PhraseMatch {
        positions,
        matched_line,
    }
}

//! Core data types shared across the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Global cap on any tier's output and on cleaned text, in characters.
///
/// Bounds downstream cost and protects against pathological crafted files
/// that would otherwise make a scanner accumulate without limit.
pub const MAX_TEXT_LEN: usize = 200_000;

/// The extraction strategy that produced a result.
///
/// Tiers are ordered by cost: the byte scanners run first, the external
/// converter and the structured parser only on weak signals, and OCR only
/// when every text-layer tier came up short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionTier {
    /// Parenthesized literal strings followed by a show-text operator.
    Literal,
    /// Angle-bracket hex strings followed by a show-text operator.
    Hex,
    /// Tokens recovered from DEFLATE-compressed content streams.
    Flate,
    /// External `pdftotext`-style command line converter.
    Cli,
    /// Full PDF object-model text extraction.
    Structured,
    /// Optical character recognition on rasterized pages.
    Ocr,
    /// Best byte-scanner candidate, kept despite failing the quality gate.
    FallbackBest,
    /// Nothing usable was recovered.
    None,
}

impl fmt::Display for ExtractionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExtractionTier::Literal => "literal",
            ExtractionTier::Hex => "hex",
            ExtractionTier::Flate => "flate",
            ExtractionTier::Cli => "cli",
            ExtractionTier::Structured => "structured",
            ExtractionTier::Ocr => "ocr",
            ExtractionTier::FallbackBest => "fallback-best",
            ExtractionTier::None => "none",
        };
        write!(f, "{}", name)
    }
}

/// Final output of one orchestrated extraction run.
///
/// The tier travels on the result itself rather than through any shared
/// process-wide state, so concurrent extractions cannot clobber each
/// other's diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    /// Cleaned text, capped at [`MAX_TEXT_LEN`] characters.
    pub text: String,
    /// Which strategy produced the text.
    pub tier: ExtractionTier,
}

impl ExtractionOutcome {
    pub fn new(text: String, tier: ExtractionTier) -> Self {
        Self { text, tier }
    }

    /// An outcome carrying no recovered text.
    pub fn empty() -> Self {
        Self {
            text: String::new(),
            tier: ExtractionTier::None,
        }
    }
}

/// Truncate to at most `max` characters, on a character boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Quality gate: decide whether a cleaned candidate is usable text.

use super::clean_extracted_text;
use crate::config::SalvageConfig;
use once_cell::sync::Lazy;
use regex::Regex;

/// Minimum natural-language signal score for acceptance.
const MIN_SIGNAL_SCORE: f64 = 0.18;
/// Token count past which a candidate is accepted regardless of score;
/// long outputs dilute noise and get the benefit of the doubt.
const LONG_OUTPUT_TOKENS: usize = 50;

static WORD_LIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{3,}").expect("word-like pattern compiles"));

/// A cleaned candidate and the gate's verdict on it.
#[derive(Debug, Clone)]
pub struct Cleaned {
    pub text: String,
    pub accept: bool,
}

/// Fraction of whitespace-delimited tokens that look like natural-language
/// words (at least three consecutive letters). Returns 0.0 for empty text.
pub fn signal_score(text: &str) -> f64 {
    let mut total = 0usize;
    let mut word_like = 0usize;
    for token in text.split_whitespace() {
        total += 1;
        if WORD_LIKE.is_match(token) {
            word_like += 1;
        }
    }
    if total == 0 {
        return 0.0;
    }
    word_like as f64 / total as f64
}

/// Accept a cleaned candidate when its signal score clears the threshold
/// or when it is long enough that noise is assumed diluted.
pub fn accepts(cleaned: &str) -> bool {
    signal_score(cleaned) >= MIN_SIGNAL_SCORE || cleaned.split_whitespace().count() > LONG_OUTPUT_TOKENS
}

/// Clean and score a raw candidate.
///
/// With `raw_text` set in the config, cleaning and scoring are bypassed
/// and the raw candidate is accepted verbatim.
pub fn maybe_clean(raw: &str, config: &SalvageConfig) -> Cleaned {
    if config.raw_text {
        return Cleaned {
            text: raw.to_string(),
            accept: true,
        };
    }
    let text = clean_extracted_text(raw);
    let accept = accepts(&text);
    Cleaned { text, accept }
}

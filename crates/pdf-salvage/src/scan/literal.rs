//! Literal-string scanner.
//!
//! Matches the content-stream idiom of a parenthesized string literal
//! immediately followed by a show-text operator (`Tj`, or `TJ` for arrays,
//! approximated by the same literal-then-operator pattern).

use super::latin1_widen;
use crate::types::MAX_TEXT_LEN;
use once_cell::sync::Lazy;
use regex::Regex;

static LITERAL_SHOW_TEXT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\(([^()\\]*(?:\\.[^()\\]*)*)\)\s*(?:Tj|TJ)").expect("literal show-text pattern compiles")
});

/// Scan raw bytes for literal show-text strings.
///
/// Matched literals are unescaped, trimmed, and joined with newlines in
/// byte-stream order. Accumulation hard-stops past [`MAX_TEXT_LEN`].
/// Returns an empty string when nothing matches.
pub fn literal_string_scan(bytes: &[u8]) -> String {
    let text = latin1_widen(bytes);
    let mut results: Vec<String> = Vec::new();
    let mut accumulated = 0usize;

    for caps in LITERAL_SHOW_TEXT.captures_iter(&text) {
        let decoded = unescape_literal(&caps[1]);
        let trimmed = decoded.trim();
        if !trimmed.is_empty() {
            accumulated += trimmed.chars().count() + 1;
            results.push(trimmed.to_string());
        }
        if accumulated > MAX_TEXT_LEN {
            break;
        }
    }

    results.join("\n")
}

/// Resolve PDF string-literal backslash escapes.
///
/// Recognized escapes map to their control characters; any other escaped
/// character passes through with the backslash dropped.
fn unescape_literal(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('b') => out.push('\u{0008}'),
            Some('f') => out.push('\u{000C}'),
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}

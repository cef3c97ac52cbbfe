//! Hex-string scanner.
//!
//! Same triggering idiom as the literal scanner but for angle-bracket hex
//! strings (`<48656C6C6F> Tj`). Byte pairs in the printable ASCII range
//! decode to themselves, 0x0A/0x0D decode to newline, and every other byte
//! value is dropped. That intentionally loses multi-byte and non-Latin
//! glyph data, an accepted limitation of this heuristic tier.

use super::latin1_widen;
use crate::types::MAX_TEXT_LEN;
use once_cell::sync::Lazy;
use regex::Regex;

static HEX_SHOW_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<([0-9A-Fa-f]{4,})>\s*(?:Tj|TJ)").expect("hex show-text pattern compiles"));

/// Scan raw bytes for hex show-text strings.
///
/// Returns decoded, trimmed, newline-joined strings in byte-stream order;
/// empty string when nothing matches. Accumulation hard-stops past
/// [`MAX_TEXT_LEN`].
pub fn hex_string_scan(bytes: &[u8]) -> String {
    let text = latin1_widen(bytes);
    let mut results: Vec<String> = Vec::new();
    let mut accumulated = 0usize;

    for caps in HEX_SHOW_TEXT.captures_iter(&text) {
        let decoded = decode_hex_pairs(&caps[1]);
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

fn decode_hex_pairs(hex: &str) -> String {
    let digits = hex.as_bytes();
    let mut out = String::with_capacity(digits.len() / 2);

    for pair in digits.chunks_exact(2) {
        let hi = (pair[0] as char).to_digit(16);
        let lo = (pair[1] as char).to_digit(16);
        let byte = match (hi, lo) {
            (Some(h), Some(l)) => (h * 16 + l) as u8,
            _ => continue,
        };
        match byte {
            0x0A | 0x0D => out.push('\n'),
            32..=126 => out.push(byte as char),
            _ => {}
        }
    }

    out
}

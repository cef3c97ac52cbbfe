//! Byte-level content-stream scanners.
//!
//! Three independent, stateless strategies that pull text straight out of
//! raw PDF bytes without building an object model: literal show-text
//! strings, hex show-text strings, and DEFLATE-compressed content streams.
//! Each scanner is best-effort by contract: it returns an empty string
//! instead of an error, so a malformed or hostile file can never abort the
//! pipeline from inside a scanner.

mod flate;
mod hex;
mod literal;

pub use flate::flate_stream_scan;
pub use hex::hex_string_scan;
pub use literal::literal_string_scan;

/// Widen raw bytes into a Latin-1 string.
///
/// Every byte maps to the Unicode code point of the same value, which
/// preserves exact byte positions for the regex scanners regardless of the
/// file's real text encoding.
pub(crate) fn latin1_widen(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// Narrow a Latin-1-widened string slice back into its original bytes.
///
/// Only valid on strings produced by [`latin1_widen`], where every char is
/// below U+0100.
pub(crate) fn latin1_narrow(text: &str) -> Vec<u8> {
    text.chars().map(|c| c as u8).collect()
}

//! Compressed-stream scanner.
//!
//! Locates `stream`/`endstream` ranges, attempts DEFLATE decompression on
//! each, and keeps only streams that decompress into a useful number of
//! word-like tokens. Image and font streams either fail to inflate or fail
//! the token filter, and are silently skipped.

use super::{latin1_narrow, latin1_widen};
use crate::types::MAX_TEXT_LEN;
use flate2::read::{DeflateDecoder, ZlibDecoder};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Read;

/// A stream must yield more than this many tokens to count as text-bearing.
const MIN_STREAM_TOKENS: usize = 10;
/// Tokens kept per stream.
const MAX_STREAM_TOKENS: usize = 2000;
/// Bound on a single stream's decompressed size, against inflation bombs.
const MAX_INFLATED_BYTES: u64 = 4 * MAX_TEXT_LEN as u64;

static STREAM_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"stream\r?\n((?s).*?)\r?\nendstream").expect("stream range pattern compiles"));

static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z0-9_-]{2,}").expect("word token pattern compiles"));

/// Scan raw bytes for text-bearing compressed streams.
///
/// Kept streams are newline-joined in byte-stream order; the global
/// [`MAX_TEXT_LEN`] cap applies. Streams that fail to decompress or yield
/// at most [`MIN_STREAM_TOKENS`] tokens contribute nothing. Never errors.
pub fn flate_stream_scan(bytes: &[u8]) -> String {
    let text = latin1_widen(bytes);
    let mut out: Vec<String> = Vec::new();
    let mut accumulated = 0usize;

    for caps in STREAM_RANGE.captures_iter(&text) {
        let raw = latin1_narrow(&caps[1]);
        let Some(inflated) = inflate(&raw) else {
            continue;
        };

        let tokens: Vec<&str> = WORD_TOKEN.find_iter(&inflated).map(|m| m.as_str()).collect();
        if tokens.len() > MIN_STREAM_TOKENS {
            let joined = tokens[..tokens.len().min(MAX_STREAM_TOKENS)].join(" ");
            accumulated += joined.chars().count() + 1;
            out.push(joined);
        }
        if accumulated > MAX_TEXT_LEN {
            break;
        }
    }

    out.join("\n")
}

/// Best-effort DEFLATE decompression, zlib-wrapped first then raw.
fn inflate(data: &[u8]) -> Option<String> {
    let mut buf = Vec::new();
    let ok = ZlibDecoder::new(data)
        .take(MAX_INFLATED_BYTES)
        .read_to_end(&mut buf)
        .is_ok();

    if !ok || buf.is_empty() {
        buf.clear();
        DeflateDecoder::new(data)
            .take(MAX_INFLATED_BYTES)
            .read_to_end(&mut buf)
            .ok()?;
    }

    if buf.is_empty() {
        return None;
    }
    Some(String::from_utf8_lossy(&buf).into_owned())
}

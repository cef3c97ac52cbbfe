//! Candidate text cleaner.
//!
//! Byte-scanner output is full of structural residue: font-reference
//! tokens, content-stream markers, CMap and page-tree vocabulary, and
//! runs of capitals with no vowels. The cleaner filters line by line,
//! keeping each surviving line exactly once in cleaned form, and collapses
//! adjacent duplicate lines left behind by repeated headers and footers.

use crate::types::MAX_TEXT_LEN;
use once_cell::sync::Lazy;
use regex::Regex;

/// PDF structural/metadata vocabulary; a line carrying three or more of
/// these tokens is dropped as object-graph residue.
const STRUCTURAL_TOKENS: &[&str] = &[
    "CIDInit",
    "ProcSet",
    "findresource",
    "begincmap",
    "CMapName",
    "defineresource",
    "FontDescriptor",
    "FontBBox",
    "BaseFont",
    "Encoding",
    "WinAnsiEncoding",
    "FirstChar",
    "LastChar",
    "ToUnicode",
    "Widths",
    "Catalog",
    "Pages",
    "Creator",
    "CreationDate",
    "ModDate",
    "XObject",
    "ImageC",
    "ImageB",
    "Type",
    "Subtype",
    "Parent",
    "Resources",
    "Font",
    "Count",
    "Kids",
];

/// Minimum letters-to-characters ratio for a line to survive.
const MIN_LETTER_RATIO: f64 = 0.25;
/// Maximum share of font-reference tokens on a line.
const MAX_FONT_REF_DENSITY: f64 = 0.6;
/// Lines below this vowel ratio with few tokens are treated as noise.
const MIN_VOWEL_RATIO: f64 = 0.2;
/// Token count at which the vowel-ratio filter stops applying, sparing
/// legitimately long all-caps headings.
const VOWEL_FILTER_MAX_TOKENS: usize = 8;

static FONT_REF_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(F_\d+\s+){3,}F_\d+$").expect("font ref run pattern compiles"));
static FONT_REF_ONLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^F_\d+$").expect("font ref pattern compiles"));
static FONT_REF_INLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bF_\d+\b").expect("inline font ref compiles"));
static STRUCT_MARKER_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(Artifact|BDC|EMC|MCID|StructParent|Pagination)$").expect("marker line pattern compiles")
});
static STRUCT_MARKER_INLINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(Artifact|BDC|EMC)\b").expect("inline marker pattern compiles"));
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("whitespace run pattern compiles"));

/// Clean raw candidate text.
///
/// Applies the line filters in order, emits each surviving line once,
/// deduplicates immediately-adjacent identical lines, and caps the output
/// at [`MAX_TEXT_LEN`] characters. Idempotent: cleaning cleaned output
/// changes nothing.
pub fn clean_extracted_text(raw: &str) -> String {
    let mut kept: Vec<String> = Vec::new();
    let mut accumulated = 0usize;

    for line in raw.lines() {
        let Some(cleaned) = clean_line(line) else {
            continue;
        };

        // Adjacent duplicates collapse to one copy.
        if kept.last().map(String::as_str) != Some(cleaned.as_str()) {
            accumulated += cleaned.chars().count() + 1;
            kept.push(cleaned);
        }
        if accumulated > MAX_TEXT_LEN {
            break;
        }
    }

    kept.join("\n")
}

/// Apply the per-line filter chain; None means the line is dropped.
fn clean_line(line: &str) -> Option<String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }
    if FONT_REF_RUN.is_match(trimmed) || FONT_REF_ONLY.is_match(trimmed) {
        return None;
    }
    if STRUCT_MARKER_LINE.is_match(trimmed) {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    let font_refs = FONT_REF_INLINE.find_iter(trimmed).count();
    if font_refs as f64 / tokens.len().max(1) as f64 > MAX_FONT_REF_DENSITY {
        return None;
    }

    let structural = tokens.iter().filter(|t| STRUCTURAL_TOKENS.contains(t)).count();
    if structural >= 3 {
        return None;
    }

    let total_chars = trimmed.chars().count();
    let letters = trimmed.chars().filter(|c| c.is_ascii_alphabetic()).count();
    if (letters as f64) / (total_chars.max(1) as f64) < MIN_LETTER_RATIO {
        return None;
    }

    // Strip inline font refs and stray structural words, then re-collapse.
    let stripped = FONT_REF_INLINE.replace_all(trimmed, " ");
    let stripped = STRUCT_MARKER_INLINE.replace_all(&stripped, " ");
    let cleaned = WHITESPACE_RUN.replace_all(&stripped, " ").trim().to_string();
    if cleaned.is_empty() {
        return None;
    }

    // Stripping can leave a bare structural marker behind; re-check so a
    // second cleaning pass removes nothing.
    if STRUCT_MARKER_LINE.is_match(&cleaned) || FONT_REF_ONLY.is_match(&cleaned) {
        return None;
    }

    let cleaned_letters = cleaned.chars().filter(|c| c.is_ascii_alphabetic()).count();
    let vowels = cleaned
        .chars()
        .filter(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
        .count();
    let vowel_ratio = vowels as f64 / cleaned_letters.max(1) as f64;
    if vowel_ratio < MIN_VOWEL_RATIO && cleaned.split_whitespace().count() < VOWEL_FILTER_MAX_TOKENS {
        return None;
    }

    Some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_dropped() {
        assert_eq!(clean_extracted_text("\n\n  \n"), "");
    }

    #[test]
    fn test_plain_prose_survives() {
        let text = "This is a perfectly ordinary sentence about documents.";
        assert_eq!(clean_extracted_text(text), text);
    }

    #[test]
    fn test_font_ref_lines_dropped() {
        assert_eq!(clean_extracted_text("F_0"), "");
        assert_eq!(clean_extracted_text("F_0 F_1 F_2 F_3"), "");
        assert_eq!(clean_extracted_text("F_12 F_13 F_14 F_15 F_16"), "");
    }

    #[test]
    fn test_structural_marker_lines_dropped() {
        for marker in ["Artifact", "BDC", "EMC", "MCID", "StructParent", "Pagination", "artifact"] {
            assert_eq!(clean_extracted_text(marker), "", "marker {marker} should drop");
        }
    }

    #[test]
    fn test_structural_keyword_lines_dropped() {
        let line = "Catalog Pages Kids something Count";
        assert_eq!(clean_extracted_text(line), "");
    }

    #[test]
    fn test_two_structural_keywords_survive() {
        let line = "the Catalog holds Pages of real content here";
        assert!(!clean_extracted_text(line).is_empty());
    }

    #[test]
    fn test_low_letter_ratio_dropped() {
        assert_eq!(clean_extracted_text("0 0 612 792 1.5 3.0 44 91"), "");
    }

    #[test]
    fn test_inline_font_refs_stripped() {
        let out = clean_extracted_text("Hello F_1 world of documents F_2 today");
        assert_eq!(out, "Hello world of documents today");
    }

    #[test]
    fn test_inline_markers_stripped() {
        let out = clean_extracted_text("Artifact heading about taxes EMC");
        assert_eq!(out, "heading about taxes");
    }

    #[test]
    fn test_vowelless_short_lines_dropped() {
        assert_eq!(clean_extracted_text("XKCD QRST ZW"), "");
    }

    #[test]
    fn test_long_caps_heading_spared() {
        let line = "TL DR QT ZX BW KP MN GH FR LN";
        // ten tokens: long enough that the vowel filter does not apply
        assert!(!clean_extracted_text(line).is_empty());
    }

    #[test]
    fn test_adjacent_duplicates_collapsed() {
        let text = "Page header\nPage header\nPage header\nBody text here";
        assert_eq!(clean_extracted_text(text), "Page header\nBody text here");
    }

    #[test]
    fn test_non_adjacent_duplicates_kept() {
        let text = "Chapter one\nSome body text\nChapter one";
        assert_eq!(clean_extracted_text(text).lines().count(), 3);
    }

    #[test]
    fn test_each_surviving_line_appears_once() {
        let out = clean_extracted_text("A single meaningful line of text");
        assert_eq!(out.lines().count(), 1);
    }

    #[test]
    fn test_cleaner_idempotent() {
        let messy = "Artifact\nHello F_1 world again\nF_0 F_1 F_2 F_3\nArtifact MCID\n\
                     Catalog Pages Kids Count markers\nNormal sentence with words.\nNormal sentence with words.";
        let once = clean_extracted_text(messy);
        let twice = clean_extracted_text(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_output_capped() {
        let mut big = String::new();
        for i in 0..8000 {
            big.push_str(&format!("meaningful sentence number {} with plenty of vowels\n", i));
        }
        let out = clean_extracted_text(&big);
        assert!(out.chars().count() <= MAX_TEXT_LEN + 64);
        assert!(out.chars().count() > MAX_TEXT_LEN / 2);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_extracted_text(""), "");
    }
}

//! Text cleaning and quality assessment for extraction candidates.

mod cleaner;
mod quality;

pub use cleaner::clean_extracted_text;
pub use quality::{accepts, maybe_clean, signal_score, Cleaned};

/// Truncate text to a bounded prefix for downstream cost control.
///
/// Appends a visible truncation marker when anything was cut.
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let prefix: String = text.chars().take(max_len).collect();
    format!("{}...\n[Text truncated for analysis]", prefix)
}

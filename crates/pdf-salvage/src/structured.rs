//! Structured parser adapter.
//!
//! Wraps a full PDF object-model text extractor (`lopdf`) for the cases
//! where the byte scanners come up short or the caller forces it. Bounded
//! to the first pages of the document and to [`MAX_TEXT_LEN`] accumulated
//! characters; per-page extraction faults are skipped, not fatal.

use crate::error::{Result, SalvageError};
use crate::types::MAX_TEXT_LEN;
use lopdf::Document;

/// Pages examined before the adapter gives up on finding more text.
const MAX_STRUCTURED_PAGES: usize = 30;

/// Extract text through the PDF object model.
///
/// Returns raw (uncleaned) page text joined with newlines. A document
/// that fails to load is an error for the orchestrator to absorb; a page
/// that fails to extract is logged and skipped.
pub fn structured_extract(bytes: &[u8]) -> Result<String> {
    let document = Document::load_mem(bytes)
        .map_err(|e| SalvageError::parsing_with_source("failed to load PDF object model", e))?;

    let pages = document.get_pages();
    let mut content = String::new();

    for (&page_number, _) in pages.iter().take(MAX_STRUCTURED_PAGES) {
        match document.extract_text(&[page_number]) {
            Ok(page_text) => {
                if !page_text.trim().is_empty() {
                    if !content.is_empty() {
                        content.push('\n');
                    }
                    content.push_str(&page_text);
                }
            }
            Err(e) => {
                tracing::debug!(page = page_number, error = %e, "structured page extraction failed");
            }
        }
        if content.chars().count() > MAX_TEXT_LEN {
            break;
        }
    }

    Ok(content)
}

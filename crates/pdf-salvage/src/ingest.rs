//! Document ingestion on top of the extraction pipeline.
//!
//! Turns uploaded PDF bytes into a stored record: runs the tier pipeline,
//! falls back to OCR when the text layer came up nearly empty, bounds the
//! stored text, and asks the AI collaborator for a summary and keywords.
//! Collaborator failures degrade to empty fields rather than failing the
//! ingest.

use crate::ai::Summarizer;
use crate::config::SalvageConfig;
use crate::ocr::OcrEngine;
use crate::pipeline::extract_text;
use crate::text::{maybe_clean, truncate_text};
use crate::types::{ExtractionOutcome, ExtractionTier};
use serde::{Deserialize, Serialize};

/// Extracted text below this length is treated as effectively no text
/// layer, triggering the OCR fallback when one is configured.
const OCR_FALLBACK_THRESHOLD_CHARS: usize = 25;

/// Cap on the text stored in a document record.
const RECORD_TEXT_CAP: usize = 20_000;

/// Placeholder stored when no tier recovered anything.
pub const NO_TEXT_MESSAGE: &str = "No textual content extracted (PDF may be image-only or encrypted).";

/// A fully ingested document, ready for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestedDocument {
    pub name: String,
    pub text: String,
    pub tier: ExtractionTier,
    pub summary: String,
    pub keywords: Vec<String>,
}

/// The text layer was missing or near-empty and OCR should be attempted.
pub fn needs_ocr_fallback(text: &str) -> bool {
    text.trim().chars().count() < OCR_FALLBACK_THRESHOLD_CHARS
}

/// Ingest one uploaded PDF.
///
/// Never fails: extraction degrades through its tiers, OCR runs only when
/// configured and needed, and collaborator errors leave the summary and
/// keywords empty.
pub async fn ingest_document(
    bytes: &[u8],
    file_name: &str,
    config: &SalvageConfig,
    summarizer: &dyn Summarizer,
) -> IngestedDocument {
    let mut outcome = extract_text(bytes, config).await;

    if needs_ocr_fallback(&outcome.text) {
        if let Some(ocr_config) = &config.ocr {
            let engine = OcrEngine::new(ocr_config).await;
            if engine.is_available() {
                let recognized = engine.recognize(bytes).await;
                let cleaned = maybe_clean(&recognized, config);
                if cleaned.text.trim().chars().count() > outcome.text.trim().chars().count() {
                    tracing::info!(chars = cleaned.text.len(), "OCR fallback recovered text");
                    outcome = ExtractionOutcome::new(cleaned.text, ExtractionTier::Ocr);
                }
            } else {
                tracing::warn!("OCR fallback configured but unavailable");
            }
        }
    }

    let name = display_name(file_name);
    let text = if outcome.text.trim().is_empty() {
        NO_TEXT_MESSAGE.to_string()
    } else {
        truncate_text(&outcome.text, RECORD_TEXT_CAP)
    };

    let (summary, keywords) = if outcome.text.trim().is_empty() {
        (String::new(), Vec::new())
    } else {
        let summary = match summarizer.summarize(&text).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(error = %e, "summarization failed");
                String::new()
            }
        };
        let keywords = match summarizer.keywords(&text).await {
            Ok(keywords) => keywords,
            Err(e) => {
                tracing::warn!(error = %e, "keyword tagging failed");
                Vec::new()
            }
        };
        (summary, keywords)
    };

    IngestedDocument {
        name,
        text,
        tier: outcome.tier,
        summary,
        keywords,
    }
}

/// Bare document name: path components stripped, trailing `.pdf` removed.
fn display_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name)
        .trim();
    let lower = base.to_ascii_lowercase();
    let stem = if lower.ends_with(".pdf") {
        &base[..base.len() - 4]
    } else {
        base
    };
    if stem.is_empty() {
        "document".to_string()
    } else {
        stem.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DisabledSummarizer;
    use crate::error::{Result, SalvageError};
    use async_trait::async_trait;

    #[test]
    fn test_needs_ocr_fallback_thresholds() {
        assert!(needs_ocr_fallback(""));
        assert!(needs_ocr_fallback("   short   "));
        assert!(needs_ocr_fallback(&"x".repeat(24)));
        assert!(!needs_ocr_fallback(&"x".repeat(25)));
        assert!(!needs_ocr_fallback(&"x".repeat(30)));
    }

    #[test]
    fn test_display_name_strips_path_and_extension() {
        assert_eq!(display_name("reports/2024/Q3 Summary.PDF"), "Q3 Summary");
        assert_eq!(display_name("C:\\uploads\\invoice.pdf"), "invoice");
        assert_eq!(display_name("plain-name"), "plain-name");
        assert_eq!(display_name(".pdf"), "document");
    }

    #[tokio::test]
    async fn test_ingest_empty_pdf_gets_placeholder() {
        let config = SalvageConfig {
            pdftotext_path: "/nonexistent/pdftotext-missing".to_string(),
            ..Default::default()
        };
        let doc = ingest_document(b"", "empty.pdf", &config, &DisabledSummarizer).await;
        assert_eq!(doc.text, NO_TEXT_MESSAGE);
        assert_eq!(doc.tier, ExtractionTier::None);
        assert!(doc.summary.is_empty());
        assert!(doc.keywords.is_empty());
    }

    #[tokio::test]
    async fn test_ingest_with_text_layer() {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        pdf.extend_from_slice(
            b"(A real document sentence with genuinely ordinary readable words in it.) Tj\n\
              (A second sentence keeps the combined scanner output comfortably strong.) Tj\n",
        );
        let config = SalvageConfig::default();
        let doc = ingest_document(&pdf, "uploads/statement.pdf", &config, &DisabledSummarizer).await;
        assert_eq!(doc.name, "statement");
        assert_eq!(doc.tier, ExtractionTier::Literal);
        assert!(doc.text.contains("real document sentence"));
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _text: &str) -> Result<String> {
            Err(SalvageError::collaborator("down"))
        }
        async fn keywords(&self, _text: &str) -> Result<Vec<String>> {
            Err(SalvageError::collaborator("down"))
        }
    }

    #[tokio::test]
    async fn test_collaborator_failure_degrades_gracefully() {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        pdf.extend_from_slice(
            b"(Strong sentences with ordinary words make this candidate acceptable.) Tj\n\
              (Plenty more ordinary words follow to keep the scanners satisfied today.) Tj\n",
        );
        let doc = ingest_document(&pdf, "doc.pdf", &SalvageConfig::default(), &FailingSummarizer).await;
        assert!(!doc.text.is_empty());
        assert!(doc.summary.is_empty());
        assert!(doc.keywords.is_empty());
    }

    #[tokio::test]
    async fn test_record_text_capped() {
        let mut pdf = b"%PDF-1.4\n".to_vec();
        for i in 0..2000 {
            pdf.extend_from_slice(format!("(Numbered sentence {} with enough ordinary words inside) Tj\n", i).as_bytes());
        }
        let doc = ingest_document(&pdf, "big.pdf", &SalvageConfig::default(), &DisabledSummarizer).await;
        assert!(doc.text.chars().count() <= RECORD_TEXT_CAP + 64);
    }
}

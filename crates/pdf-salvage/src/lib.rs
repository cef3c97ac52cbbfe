//! Tiered text extraction for damaged, malformed, and image-only PDFs.
//!
//! The library recovers text through a sequence of increasingly expensive
//! tiers: three byte-level scanners that need no object model, an external
//! `pdftotext`-style converter, a structured object-model parser, and an
//! OCR fallback for documents with no usable text layer. A quality gate
//! cleans and scores each candidate, and the winning tier travels on the
//! result.
//!
//! # Example
//!
//! ```no_run
//! use pdf_salvage::{extract_text, SalvageConfig};
//!
//! # async fn run() {
//! let bytes = std::fs::read("scan.pdf").unwrap();
//! let outcome = extract_text(&bytes, &SalvageConfig::default()).await;
//! println!("{} ({})", outcome.text, outcome.tier);
//! # }
//! ```

#![deny(unsafe_code)]

pub mod ai;
pub mod config;
pub mod convert;
pub mod error;
pub mod ingest;
pub mod ocr;
pub mod pipeline;
pub mod scan;
pub mod structured;
pub mod text;
pub mod types;

pub use ai::{DisabledSummarizer, HttpSummarizer, Summarizer};
pub use config::{AiConfig, OcrConfig, SalvageConfig};
pub use convert::ExternalConverter;
pub use error::{Result, SalvageError};
pub use ingest::{ingest_document, needs_ocr_fallback, IngestedDocument, NO_TEXT_MESSAGE};
pub use ocr::OcrEngine;
pub use pipeline::extract_text;
pub use structured::structured_extract;
pub use text::{clean_extracted_text, signal_score, truncate_text};
pub use types::{ExtractionOutcome, ExtractionTier, MAX_TEXT_LEN};

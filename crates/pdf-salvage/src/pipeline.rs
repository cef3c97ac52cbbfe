//! Tiered extraction orchestrator.
//!
//! Runs the cheap byte scanners first and escalates sequentially to the
//! external converter, the structured parser, and finally a best-effort
//! fallback, based on how much signal the scanners recovered. An accepted
//! scanner candidate returns immediately; the expensive tiers never run
//! for a document whose text layer reads cleanly. The pipeline itself
//! never fails: every tier error is logged and absorbed, and the worst
//! case is an empty outcome.

use crate::config::SalvageConfig;
use crate::convert::ExternalConverter;
use crate::scan::{flate_stream_scan, hex_string_scan, literal_string_scan};
use crate::structured::structured_extract;
use crate::text::maybe_clean;
use crate::types::{truncate_chars, ExtractionOutcome, ExtractionTier, MAX_TEXT_LEN};

/// Minimum trimmed length for any single scanner candidate to count.
const MIN_CANDIDATE_CHARS: usize = 40;
/// Combined scanner output below this triggers the converter tier.
const CONVERTER_ESCALATION_CHARS: usize = 120;
/// Combined scanner output below this triggers the structured parser.
const STRUCTURED_ESCALATION_CHARS: usize = 80;
/// Minimum raw structured-parser output accepted as a result.
const MIN_STRUCTURED_CHARS: usize = 20;

/// Extract text from PDF bytes, escalating through tiers as needed.
///
/// Deterministic for a given input and configuration, and infallible:
/// tier failures degrade to the next tier, never to an error. The tier
/// that produced the returned text travels on the outcome.
pub async fn extract_text(bytes: &[u8], config: &SalvageConfig) -> ExtractionOutcome {
    let literal = literal_string_scan(bytes);
    let hex = hex_string_scan(bytes);
    let flate = flate_stream_scan(bytes);

    let literal_len = literal.trim().chars().count();
    let hex_len = hex.trim().chars().count();
    let flate_len = flate.trim().chars().count();
    let combined = literal_len + hex_len + flate_len;

    tracing::debug!(literal_len, hex_len, flate_len, "scanner tiers complete");

    // An accepted scanner candidate short-circuits everything below. Hex
    // and flate only displace the literal result when they recovered
    // strictly more than it did.
    if literal_len > MIN_CANDIDATE_CHARS {
        if let Some(text) = gated(&literal, config) {
            tracing::debug!(chars = text.len(), "literal tier accepted");
            return ExtractionOutcome::new(text, ExtractionTier::Literal);
        }
    }

    if hex_len > literal_len && hex_len > MIN_CANDIDATE_CHARS {
        if let Some(text) = gated(&hex, config) {
            tracing::debug!(chars = text.len(), "hex tier accepted");
            return ExtractionOutcome::new(text, ExtractionTier::Hex);
        }
    }

    if flate_len > literal_len && flate_len > MIN_CANDIDATE_CHARS {
        if let Some(text) = gated(&flate, config) {
            tracing::debug!(chars = text.len(), "flate tier accepted");
            return ExtractionOutcome::new(text, ExtractionTier::Flate);
        }
    }

    let force_structured = config.force_structured || combined < MIN_CANDIDATE_CHARS;

    // Converter tier: on explicit request or weak combined scanner signal.
    if config.enable_pdftotext || (!force_structured && combined < CONVERTER_ESCALATION_CHARS) {
        let converter = ExternalConverter::from_config(config);
        match converter.convert(bytes).await {
            Ok(output) if output.trim().chars().count() > MIN_CANDIDATE_CHARS => {
                let cleaned = maybe_clean(&output, config);
                if !cleaned.text.is_empty() {
                    tracing::debug!(chars = cleaned.text.len(), "converter tier accepted");
                    return ExtractionOutcome::new(cap(&cleaned.text), ExtractionTier::Cli);
                }
            }
            Ok(_) => tracing::debug!("converter output too short, continuing"),
            Err(e) => tracing::debug!(error = %e, "converter tier unavailable"),
        }
    }

    // Structured tier: forced, or both scanners and converter were weak.
    if force_structured || combined < STRUCTURED_ESCALATION_CHARS {
        match structured_extract(bytes) {
            Ok(raw) if raw.trim().chars().count() >= MIN_STRUCTURED_CHARS => {
                let cleaned = maybe_clean(&raw, config);
                if !cleaned.text.is_empty() {
                    tracing::debug!(chars = cleaned.text.len(), "structured tier accepted");
                    return ExtractionOutcome::new(cap(&cleaned.text), ExtractionTier::Structured);
                }
            }
            Ok(_) => tracing::debug!("structured output too short, continuing"),
            Err(e) => tracing::debug!(error = %e, "structured tier failed"),
        }
    }

    // Last resort: keep the longest scanner candidate even though it
    // failed the gate, if cleaning leaves anything at all.
    let best_raw = [(&flate, flate_len), (&hex, hex_len), (&literal, literal_len)]
        .into_iter()
        .max_by_key(|(_, len)| *len)
        .map(|(raw, _)| raw);
    if let Some(raw) = best_raw {
        let cleaned = maybe_clean(raw, config);
        if !cleaned.text.trim().is_empty() {
            tracing::debug!("fallback tier keeps ungated scanner output");
            return ExtractionOutcome::new(cap(&cleaned.text), ExtractionTier::FallbackBest);
        }
    }

    tracing::debug!("no tier produced usable text");
    ExtractionOutcome::empty()
}

/// Clean and gate a scanner candidate; Some means accepted.
fn gated(raw: &str, config: &SalvageConfig) -> Option<String> {
    let cleaned = maybe_clean(raw, config);
    if cleaned.accept && !cleaned.text.is_empty() {
        Some(cap(&cleaned.text))
    } else {
        None
    }
}

fn cap(text: &str) -> String {
    truncate_chars(text, MAX_TEXT_LEN).to_string()
}

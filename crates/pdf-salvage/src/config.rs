//! Configuration loading and management.
//!
//! [`SalvageConfig`] controls tier selection and the external tool paths.
//! It can be loaded from a TOML file or created programmatically; every
//! field has a sensible default so `SalvageConfig::default()` is a working
//! production configuration.

use crate::{Result, SalvageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalvageConfig {
    /// Always run the structured object-model parser instead of trusting
    /// the byte scanners.
    #[serde(default)]
    pub force_structured: bool,

    /// Enable the external `pdftotext` converter tier unconditionally.
    /// When false the tier still runs as a fallback on weak scanner output.
    #[serde(default)]
    pub enable_pdftotext: bool,

    /// Executable invoked for the converter tier.
    #[serde(default = "default_pdftotext_path")]
    pub pdftotext_path: String,

    /// Wall-clock bound on one converter invocation; the process is killed
    /// when it elapses.
    #[serde(default = "default_pdftotext_timeout")]
    pub pdftotext_timeout_secs: u64,

    /// Bypass cleaning and scoring entirely and accept raw candidate text.
    /// Debugging aid, not a production mode.
    #[serde(default)]
    pub raw_text: bool,

    /// OCR configuration (None = OCR fallback disabled).
    #[serde(default)]
    pub ocr: Option<OcrConfig>,

    /// AI summarization collaborator (None = summarization disabled).
    #[serde(default)]
    pub ai: Option<AiConfig>,
}

impl Default for SalvageConfig {
    fn default() -> Self {
        Self {
            force_structured: false,
            enable_pdftotext: false,
            pdftotext_path: default_pdftotext_path(),
            pdftotext_timeout_secs: default_pdftotext_timeout(),
            raw_text: false,
            ocr: None,
            ai: None,
        }
    }
}

impl SalvageConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        toml::from_str(&content).map_err(|e| {
            SalvageError::parsing_with_source(
                format!("invalid config file {}", path.as_ref().display()),
                e,
            )
        })
    }
}

/// OCR fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    /// Tesseract language code (e.g., "eng", "deu").
    #[serde(default = "default_language")]
    pub language: String,

    /// Maximum number of pages rasterized and recognized.
    #[serde(default = "default_page_limit")]
    pub page_limit: usize,

    /// Executable invoked for recognition.
    #[serde(default = "default_tesseract_path")]
    pub tesseract_path: String,

    /// Rasterization scale applied to the page's point dimensions.
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            page_limit: default_page_limit(),
            tesseract_path: default_tesseract_path(),
            render_scale: default_render_scale(),
        }
    }
}

/// AI summarization collaborator configuration.
///
/// The collaborator is an opaque text-in/text-out service; the pipeline
/// only ever sends it a bounded prefix of the extracted text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    /// Chat-completions style endpoint URL.
    pub endpoint: String,

    /// Model identifier sent with each request.
    pub model: String,

    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Maximum characters of extracted text sent per request.
    #[serde(default = "default_max_prompt_chars")]
    pub max_prompt_chars: usize,
}

fn default_pdftotext_path() -> String {
    "pdftotext".to_string()
}
fn default_pdftotext_timeout() -> u64 {
    15
}
fn default_language() -> String {
    "eng".to_string()
}
fn default_page_limit() -> usize {
    6
}
fn default_tesseract_path() -> String {
    "tesseract".to_string()
}
fn default_render_scale() -> f32 {
    1.5
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_max_prompt_chars() -> usize {
    8000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SalvageConfig::default();
        assert!(!config.force_structured);
        assert!(!config.enable_pdftotext);
        assert_eq!(config.pdftotext_path, "pdftotext");
        assert_eq!(config.pdftotext_timeout_secs, 15);
        assert!(!config.raw_text);
        assert!(config.ocr.is_none());
        assert!(config.ai.is_none());
    }

    #[test]
    fn test_ocr_defaults() {
        let ocr = OcrConfig::default();
        assert_eq!(ocr.language, "eng");
        assert_eq!(ocr.page_limit, 6);
        assert_eq!(ocr.tesseract_path, "tesseract");
        assert_eq!(ocr.render_scale, 1.5);
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: SalvageConfig = toml::from_str(
            r#"
            force_structured = true

            [ocr]
            language = "deu"
            "#,
        )
        .unwrap();
        assert!(config.force_structured);
        let ocr = config.ocr.unwrap();
        assert_eq!(ocr.language, "deu");
        assert_eq!(ocr.page_limit, 6);
    }

    #[test]
    fn test_deserialize_empty_toml() {
        let config: SalvageConfig = toml::from_str("").unwrap();
        assert_eq!(config.pdftotext_timeout_secs, 15);
    }

    #[test]
    fn test_ai_config_defaults() {
        let config: SalvageConfig = toml::from_str(
            r#"
            [ai]
            endpoint = "https://api.openai.com/v1/chat/completions"
            model = "gpt-4o"
            "#,
        )
        .unwrap();
        let ai = config.ai.unwrap();
        assert_eq!(ai.api_key_env, "OPENAI_API_KEY");
        assert_eq!(ai.max_prompt_chars, 8000);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = SalvageConfig::from_toml_file("/nonexistent/salvage.toml");
        assert!(result.is_err());
    }
}

//! OCR engine built on a rendering library plus a `tesseract` executable.
//!
//! Both halves are optional at runtime. The renderer binds to a Pdfium
//! shared library if one can be found, and the recognizer probes for the
//! tesseract binary once at construction. When either half is missing the
//! engine reports itself unavailable and recognition yields no text
//! instead of failing the pipeline.

use super::preprocess::threshold_contrast;
use crate::config::OcrConfig;
use crate::types::MAX_TEXT_LEN;
use image::DynamicImage;
use pdfium_render::prelude::*;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

pub struct OcrEngine {
    pdfium: Option<Pdfium>,
    tesseract_available: bool,
    config: OcrConfig,
}

impl OcrEngine {
    /// Probe both capabilities and build the engine.
    ///
    /// Never fails; missing pieces are recorded and logged.
    pub async fn new(config: &OcrConfig) -> Self {
        let pdfium = match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
        {
            Ok(bindings) => Some(Pdfium::new(bindings)),
            Err(e) => {
                tracing::warn!(error = %e, "Pdfium library not found; OCR rendering unavailable");
                None
            }
        };

        let tesseract_available = probe_tesseract(&config.tesseract_path).await;
        if !tesseract_available {
            tracing::warn!(path = %config.tesseract_path, "tesseract executable not found; OCR unavailable");
        }

        Self {
            pdfium,
            tesseract_available,
            config: config.clone(),
        }
    }

    /// Both the renderer and the recognizer are present.
    pub fn is_available(&self) -> bool {
        self.pdfium.is_some() && self.tesseract_available
    }

    /// Render the leading pages and recognize them.
    ///
    /// Returns whatever text came out, possibly empty. Render or
    /// recognition failures on one page skip that page only.
    pub async fn recognize(&self, pdf_bytes: &[u8]) -> String {
        let Some(pdfium) = &self.pdfium else {
            return String::new();
        };
        if !self.tesseract_available {
            return String::new();
        }

        let pages = match self.render_pages(pdfium, pdf_bytes) {
            Ok(pages) => pages,
            Err(message) => {
                tracing::debug!(error = %message, "OCR render failed");
                return String::new();
            }
        };

        let mut combined = String::new();
        for (index, page) in pages.iter().enumerate() {
            match self.recognize_page(page).await {
                Ok(page_text) => {
                    let trimmed = page_text.trim();
                    if !trimmed.is_empty() {
                        if !combined.is_empty() {
                            combined.push('\n');
                        }
                        combined.push_str(trimmed);
                    }
                }
                Err(message) => {
                    tracing::debug!(page = index, error = %message, "OCR page recognition failed");
                }
            }
            if combined.chars().count() > MAX_TEXT_LEN {
                break;
            }
        }
        combined
    }

    fn render_pages(&self, pdfium: &Pdfium, pdf_bytes: &[u8]) -> std::result::Result<Vec<DynamicImage>, String> {
        let document = pdfium
            .load_pdf_from_byte_slice(pdf_bytes, None)
            .map_err(|e| e.to_string())?;

        let page_count = (document.pages().len() as usize).min(self.config.page_limit);
        let mut images = Vec::with_capacity(page_count);

        for page_index in 0..page_count {
            let page = document.pages().get(page_index as u16).map_err(|e| e.to_string())?;
            let width = ((page.width().value * self.config.render_scale) as i32).max(1);
            let height = ((page.height().value * self.config.render_scale) as i32).max(1);
            let render_config = PdfRenderConfig::new().set_target_width(width).set_target_height(height);
            let bitmap = page.render_with_config(&render_config).map_err(|e| e.to_string())?;
            images.push(bitmap.as_image());
        }

        Ok(images)
    }

    async fn recognize_page(&self, page: &DynamicImage) -> std::result::Result<String, String> {
        let image_path = std::env::temp_dir().join(format!(
            "salvage_ocr_{}_{}.png",
            std::process::id(),
            uuid::Uuid::new_v4()
        ));
        let _guard = TempImage::new(image_path.clone());

        let prepared = threshold_contrast(page);
        prepared.save(&image_path).map_err(|e| e.to_string())?;

        let output = Command::new(&self.config.tesseract_path)
            .arg(&image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            return Err(format!("tesseract exited with {}", output.status));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

async fn probe_tesseract(path: &str) -> bool {
    Command::new(path)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .status()
        .await
        .map(|status| status.success())
        .unwrap_or(false)
}

struct TempImage {
    path: PathBuf,
}

impl TempImage {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl Drop for TempImage {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OcrConfig;

    fn config_with_tesseract(path: &str) -> OcrConfig {
        OcrConfig {
            tesseract_path: path.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_probe_missing_tesseract() {
        assert!(!probe_tesseract("/nonexistent/tesseract-missing").await);
    }

    #[tokio::test]
    async fn test_engine_unavailable_without_tesseract() {
        let engine = OcrEngine::new(&config_with_tesseract("/nonexistent/tesseract-missing")).await;
        assert!(!engine.is_available());
    }

    #[tokio::test]
    async fn test_recognize_without_capabilities_is_empty() {
        let engine = OcrEngine::new(&config_with_tesseract("/nonexistent/tesseract-missing")).await;
        let text = engine.recognize(b"%PDF-1.4").await;
        assert_eq!(text, "");
    }

    #[tokio::test]
    async fn test_recognize_never_panics_on_garbage() {
        let engine = OcrEngine::new(&OcrConfig::default()).await;
        let _ = engine.recognize(b"definitely not a pdf").await;
        let _ = engine.recognize(&[]).await;
    }
}

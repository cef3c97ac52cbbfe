//! OCR fallback for image-only and encrypted-stream documents.

mod engine;
mod preprocess;

pub use engine::OcrEngine;
pub use preprocess::threshold_contrast;

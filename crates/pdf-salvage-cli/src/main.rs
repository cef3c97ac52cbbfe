//! Command-line interface for tiered PDF text salvage.

use anyhow::{Context, Result};
use clap::Parser;
use pdf_salvage::{
    extract_text, ingest_document, DisabledSummarizer, HttpSummarizer, OcrConfig, SalvageConfig, Summarizer,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pdf-salvage")]
#[command(about = "Recover text from damaged, malformed, and image-only PDFs", long_about = None)]
#[command(version)]
struct Cli {
    /// PDF file to extract text from
    input: PathBuf,

    /// Load configuration from a TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit the full document record as JSON
    #[arg(long)]
    json: bool,

    /// Skip the byte scanners and go straight to the structured parser
    #[arg(long)]
    force_structured: bool,

    /// Always try the external pdftotext converter
    #[arg(long)]
    enable_pdftotext: bool,

    /// Path to the pdftotext executable
    #[arg(long)]
    pdftotext_path: Option<String>,

    /// Skip cleaning and quality scoring, output raw candidate text
    #[arg(long)]
    raw: bool,

    /// Enable the OCR fallback for image-only documents
    #[arg(long)]
    ocr: bool,

    /// Tesseract language code for OCR
    #[arg(long, default_value = "eng")]
    ocr_language: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => SalvageConfig::from_toml_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => SalvageConfig::default(),
    };

    if cli.force_structured {
        config.force_structured = true;
    }
    if cli.enable_pdftotext {
        config.enable_pdftotext = true;
    }
    if let Some(path) = cli.pdftotext_path {
        config.pdftotext_path = path;
    }
    if cli.raw {
        config.raw_text = true;
    }
    if cli.ocr && config.ocr.is_none() {
        config.ocr = Some(OcrConfig {
            language: cli.ocr_language.clone(),
            ..Default::default()
        });
    }

    let bytes = std::fs::read(&cli.input).with_context(|| format!("failed to read {}", cli.input.display()))?;

    if cli.json {
        let summarizer: Box<dyn Summarizer> = match config.ai.clone() {
            Some(ai) => Box::new(HttpSummarizer::new(ai)),
            None => Box::new(DisabledSummarizer),
        };
        let file_name = cli.input.to_string_lossy();
        let document = ingest_document(&bytes, &file_name, &config, summarizer.as_ref()).await;
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        let outcome = extract_text(&bytes, &config).await;
        tracing::info!(tier = %outcome.tier, chars = outcome.text.len(), "extraction complete");
        println!("{}", outcome.text);
    }

    Ok(())
}

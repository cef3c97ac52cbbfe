//! AI collaborator seam for document summarization and keyword tagging.
//!
//! The pipeline treats the collaborator as an opaque text-in/text-out
//! service behind the [`Summarizer`] trait. Only a bounded prefix of the
//! extracted text is ever sent out, and callers are expected to degrade
//! gracefully when a call fails.

use crate::config::AiConfig;
use crate::error::{Result, SalvageError};
use crate::text::truncate_text;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Maximum keywords returned per document.
const MAX_KEYWORDS: usize = 7;

/// Text-in/text-out summarization service.
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// One-paragraph summary of the document text.
    async fn summarize(&self, text: &str) -> Result<String>;

    /// Short topical keywords for the document text.
    async fn keywords(&self, text: &str) -> Result<Vec<String>>;
}

/// No-op collaborator used when no AI endpoint is configured.
pub struct DisabledSummarizer;

#[async_trait]
impl Summarizer for DisabledSummarizer {
    async fn summarize(&self, _text: &str) -> Result<String> {
        Ok(String::new())
    }

    async fn keywords(&self, _text: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Chat-completions backed collaborator.
pub struct HttpSummarizer {
    client: reqwest::Client,
    config: AiConfig,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl HttpSummarizer {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let api_key = std::env::var(&self.config.api_key_env).map_err(|_| {
            SalvageError::collaborator(format!("API key not set in {}", self.config.api_key_env))
        })?;

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SalvageError::collaborator(format!(
                "endpoint returned {}",
                response.status()
            )));
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SalvageError::collaborator("endpoint returned no choices"))
    }
}

#[async_trait]
impl Summarizer for HttpSummarizer {
    async fn summarize(&self, text: &str) -> Result<String> {
        let prompt = truncate_text(text, self.config.max_prompt_chars);
        let summary = self
            .complete(
                "You summarize documents. Reply with one concise paragraph and nothing else.",
                &prompt,
            )
            .await?;
        Ok(summary.trim().to_string())
    }

    async fn keywords(&self, text: &str) -> Result<Vec<String>> {
        let prompt = truncate_text(text, self.config.max_prompt_chars);
        let raw = self
            .complete(
                "You tag documents. Reply with a comma-separated list of topical keywords and nothing else.",
                &prompt,
            )
            .await?;
        Ok(parse_keywords(&raw))
    }
}

fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|k| k.trim().trim_matches('"').to_string())
        .filter(|k| k.len() > 2)
        .take(MAX_KEYWORDS)
        .collect()
}

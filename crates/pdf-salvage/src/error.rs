//! Error types for pdf-salvage.
//!
//! All fallible operations in the library return [`Result`]. The byte
//! scanners are deliberately infallible: they degrade to an empty string
//! instead of returning errors, so only the adapter tiers (structured
//! parser, external converter, OCR, AI collaborator) produce values of
//! [`SalvageError`], and the orchestrator absorbs all of them. No tier
//! error ever reaches the caller of the pipeline.

use thiserror::Error;

/// Result type alias using `SalvageError`.
pub type Result<T> = std::result::Result<T, SalvageError>;

/// Main error type for all pdf-salvage operations.
#[derive(Debug, Error)]
pub enum SalvageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parsing error: {message}")]
    Parsing {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("OCR error: {message}")]
    Ocr {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Converter error: {message}")]
    Converter {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Collaborator error: {message}")]
    Collaborator {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Serialization error: {message}")]
    Serialization {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("Missing dependency: {0}")]
    MissingDependency(String),
}

impl SalvageError {
    /// Create a Parsing error.
    pub fn parsing<S: Into<String>>(message: S) -> Self {
        Self::Parsing {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Parsing error with source.
    pub fn parsing_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Parsing {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an Ocr error.
    pub fn ocr<S: Into<String>>(message: S) -> Self {
        Self::Ocr {
            message: message.into(),
            source: None,
        }
    }

    /// Create an Ocr error with source.
    pub fn ocr_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ocr {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a Converter error.
    pub fn converter<S: Into<String>>(message: S) -> Self {
        Self::Converter {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Collaborator error.
    pub fn collaborator<S: Into<String>>(message: S) -> Self {
        Self::Collaborator {
            message: message.into(),
            source: None,
        }
    }

    /// Create a Collaborator error with source.
    pub fn collaborator_with_source<S, E>(message: S, source: E) -> Self
    where
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Collaborator {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<serde_json::Error> for SalvageError {
    fn from(err: serde_json::Error) -> Self {
        SalvageError::Serialization {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

impl From<reqwest::Error> for SalvageError {
    fn from(err: reqwest::Error) -> Self {
        SalvageError::Collaborator {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}

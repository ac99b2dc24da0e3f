//! Error types for stacksense-core.

use thiserror::Error;

/// Result type alias using stacksense-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a curated response.
#[derive(Error, Debug)]
pub enum Error {
    /// LLM API error with provider context
    #[error("LLM API error: {provider} - {message}")]
    LlmApi { provider: String, message: String },

    /// LLM error (simple variant)
    #[error("LLM error: {0}")]
    Llm(String),

    /// Search API error
    #[error("Search API error: {0}")]
    Search(String),

    /// Timeout during an outbound call
    #[error("Operation timed out after {duration_ms}ms")]
    Timeout { duration_ms: u64 },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// No questions survived retrieval, even after the fallback query
    #[error("No sources found for query")]
    NoSources,
}

impl Error {
    /// Create an LLM API error.
    pub fn llm_api(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::LlmApi {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a search API error.
    pub fn search(message: impl Into<String>) -> Self {
        Self::Search(message.into())
    }

    /// Create a timeout error.
    pub fn timeout(duration_ms: u64) -> Self {
        Self::Timeout { duration_ms }
    }
}

//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use std::path::PathBuf;
use thiserror::Error;

/// Substring the API uses when rejecting an unknown model identifier.
pub const INVALID_MODEL_MARKER: &str = "not a valid model ID";

#[derive(Error, Debug)]
pub enum Error {
    #[error(
        "OPENROUTER_API_KEY not found. Add it to {} or export as environment variable.",
        .0.display()
    )]
    MissingCredential(PathBuf),

    #[error("OpenRouter request failed: {}", with_causes(.0))]
    Transport(#[from] reqwest::Error),

    #[error("OpenRouter HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Invalid JSON response from OpenRouter: {excerpt}")]
    Decode { excerpt: String },

    #[error("{0}")]
    MalformedResponse(String),

    #[error("{0}")]
    PreconditionFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Failed to fetch models: {0}")]
    ModelListing(#[source] Box<Error>),

    #[error("{source}\nTry one of these image models: {}", .models.join(", "))]
    WithSuggestions {
        #[source]
        source: Box<Error>,
        models: Vec<String>,
    },
}

impl Error {
    /// True when the API rejected the requested model identifier.
    pub fn is_invalid_model(&self) -> bool {
        self.to_string().contains(INVALID_MODEL_MARKER)
    }
}

/// `err` followed by its source chain, so connect/DNS/timeout causes reach the user.
fn with_causes(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, Error>;

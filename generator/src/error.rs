//! Generator error types

use thiserror::Error;
use shared::{ApiFailure, SharedError};

/// Result type for generator operations
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Generator error types
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No API key configured. Pass --api-key or set GOOGLE_API_KEY (up to 10 keys, one per line)")]
    Unconfigured,

    #[error("Product name is required")]
    MissingProductName,

    #[error("All {attempts} generation attempts failed, last error: {last_failure}. The provider may be overloaded or the quota exhausted, try again later")]
    Exhausted { attempts: usize, last_failure: ApiFailure },

    #[error("Provider request failed: {reason}")]
    Provider { reason: ApiFailure },

    #[error("Could not decode suggestions: {message}")]
    SuggestionDecode { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GeneratorError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }
}

//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::errors::{SharedError, SharedResult};

/// Maximum number of credentials considered for rotation
pub const MAX_CREDENTIALS: usize = 10;

/// Placeholder values shipped in sample settings; they mean "not configured"
pub const PLACEHOLDER_CREDENTIALS: &[&str] = &["PASTE_YOUR_API_KEY_HERE", "YOUR_API_KEY_HERE"];

/// Opaque API credential
///
/// The value never appears in `Debug` or `Display` output; use [`Credential::masked`]
/// when a credential has to be identified to a human. It has no serde
/// representation.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw credential value, for building the outgoing request only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Short form showing the first and last five characters
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }
        let head: String = chars[..5].iter().collect();
        let tail: String = chars[chars.len() - 5..].iter().collect();
        format!("{head}...{tail}")
    }

    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER_CREDENTIALS.contains(&self.0.as_str())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential({})", self.masked())
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Ordered list of credentials; order is rotation priority
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialList(Vec<Credential>);

impl CredentialList {
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Build from individually entered values: trimmed, blanks dropped, capped at [`MAX_CREDENTIALS`]
    pub fn from_input<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            values
                .into_iter()
                .map(|value| value.as_ref().trim().to_string())
                .filter(|value| !value.is_empty())
                .take(MAX_CREDENTIALS)
                .map(Credential::new)
                .collect(),
        )
    }

    /// Same as [`CredentialList::from_input`] but rejects more than [`MAX_CREDENTIALS`] non-blank values
    pub fn try_from_input<I, S>(values: I) -> SharedResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let cleaned: Vec<String> = values
            .into_iter()
            .map(|value| value.as_ref().trim().to_string())
            .filter(|value| !value.is_empty())
            .collect();

        if cleaned.len() > MAX_CREDENTIALS {
            return Err(SharedError::TooManyCredentials {
                count: cleaned.len(),
                max: MAX_CREDENTIALS,
            });
        }

        Ok(Self::from_input(cleaned))
    }

    /// Parse a newline-delimited settings block; placeholder values are dropped
    pub fn from_block(block: &str) -> Self {
        let list = Self::from_input(block.lines());
        Self(list.0.into_iter().filter(|credential| !credential.is_placeholder()).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&Credential> {
        self.0.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Credential> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a CredentialList {
    type Item = &'a Credential;
    type IntoIter = std::slice::Iter<'a, Credential>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Identifier of a generative model, e.g. `gemini-2.0-flash`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelId(String);

impl ModelId {
    pub fn parse(input: &str) -> SharedResult<Self> {
        let trimmed = input.trim();
        let trimmed = trimmed.strip_prefix("models/").unwrap_or(trimmed);
        if trimmed.is_empty() || trimmed.chars().any(|c| c.is_whitespace() || c == '/') {
            return Err(SharedError::InvalidModel {
                input: input.to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Models tried for each credential, in order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelCandidates {
    pub primary: ModelId,
    pub fallback: ModelId,
}

impl ModelCandidates {
    pub const DEFAULT_PRIMARY: &'static str = "gemini-2.0-flash";
    pub const DEFAULT_FALLBACK: &'static str = "gemini-flash-latest";

    pub fn new(primary: ModelId, fallback: ModelId) -> Self {
        Self { primary, fallback }
    }

    /// Primary first, then fallback
    pub fn ordered(&self) -> [&ModelId; 2] {
        [&self.primary, &self.fallback]
    }
}

impl Default for ModelCandidates {
    fn default() -> Self {
        Self {
            primary: ModelId(Self::DEFAULT_PRIMARY.to_string()),
            fallback: ModelId(Self::DEFAULT_FALLBACK.to_string()),
        }
    }
}

/// API failure reasons for generation requests
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    /// Authentication failed (invalid API key)
    #[error("authentication failed")]
    AuthenticationFailed,
    /// Rate limit exceeded
    #[error("rate limit exceeded")]
    RateLimitExceeded,
    /// Request quota exceeded
    #[error("quota exceeded")]
    QuotaExceeded,
    /// Invalid request format or parameters
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// Model not found or unavailable
    #[error("model unavailable: {0}")]
    ModelUnavailable(String),
    /// Network/connection error
    #[error("network error: {0}")]
    NetworkError(String),
    /// Server error from provider
    #[error("server error: {0}")]
    ServerError(String),
    /// Request timeout
    #[error("request timed out")]
    Timeout,
    /// Prompt or response blocked by the provider
    #[error("content blocked by provider: {0}")]
    ContentPolicyViolation(String),
    /// Service temporarily unavailable
    #[error("service unavailable")]
    ServiceUnavailable,
    /// Unknown or unhandled error
    #[error("unknown error: {0}")]
    Unknown(String),
}

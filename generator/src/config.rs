//! Generator configuration
//!
//! Values come from the process environment, optionally seeded from a `.env`
//! file in the current directory or its parents. Command line flags override
//! them in the binary.
//!
//! ## Recognised variables
//! - `GOOGLE_API_KEY`: default credentials, one per line (max 10)
//! - `GEMINI_PRIMARY_MODEL`, `GEMINI_FALLBACK_MODEL`: models tried per credential
//! - `GEMINI_API_BASE`: base URL of the generation API
//! - `GENERATION_TIMEOUT_SECS`: timeout of a single generation call
//! - `SCRAPE_TIMEOUT_SECS`: timeout of a competitor page fetch
//! - `COMPETITOR_HISTORY_FILE`: path of the competitor URL history
//! - `LANDING_OUTPUT_DIR`: directory the page and copy draft are written to
//! - `COPY_LANGUAGE`: language the copy is written in

use std::path::PathBuf;
use std::time::Duration;

use shared::{CredentialList, ModelCandidates, ModelId};
use crate::error::{GeneratorError, GeneratorResult};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_HISTORY_FILE: &str = "competitor_history.json";
pub const DEFAULT_OUTPUT_DIR: &str = ".";
pub const DEFAULT_LANGUAGE: &str = "Bahasa Indonesia";

/// Runtime configuration of the generator
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub default_credentials: CredentialList,
    pub models: ModelCandidates,
    pub api_base: String,
    pub generation_timeout: Duration,
    pub scrape_timeout: Duration,
    pub history_path: PathBuf,
    pub output_dir: PathBuf,
    pub language: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            default_credentials: CredentialList::empty(),
            models: ModelCandidates::default(),
            api_base: DEFAULT_API_BASE.to_string(),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            scrape_timeout: DEFAULT_SCRAPE_TIMEOUT,
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load from the process environment after reading `.env` if present
    pub fn from_env() -> GeneratorResult<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> GeneratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(block) = lookup("GOOGLE_API_KEY") {
            config.default_credentials = CredentialList::from_block(&block);
        }

        let primary = match lookup("GEMINI_PRIMARY_MODEL") {
            Some(value) => ModelId::parse(&value)?,
            None => config.models.primary.clone(),
        };
        let fallback = match lookup("GEMINI_FALLBACK_MODEL") {
            Some(value) => ModelId::parse(&value)?,
            None => config.models.fallback.clone(),
        };
        config.models = ModelCandidates::new(primary, fallback);

        if let Some(base) = lookup("GEMINI_API_BASE") {
            let trimmed = base.trim().trim_end_matches('/');
            url::Url::parse(trimmed)
                .map_err(|e| GeneratorError::config(format!("GEMINI_API_BASE is not a valid URL: {e}")))?;
            config.api_base = trimmed.to_string();
        }

        if let Some(value) = lookup("GENERATION_TIMEOUT_SECS") {
            config.generation_timeout = parse_seconds("GENERATION_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = lookup("SCRAPE_TIMEOUT_SECS") {
            config.scrape_timeout = parse_seconds("SCRAPE_TIMEOUT_SECS", &value)?;
        }
        if let Some(path) = lookup("COMPETITOR_HISTORY_FILE").filter(|p| !p.trim().is_empty()) {
            config.history_path = PathBuf::from(path.trim());
        }
        if let Some(dir) = lookup("LANDING_OUTPUT_DIR").filter(|d| !d.trim().is_empty()) {
            config.output_dir = PathBuf::from(dir.trim());
        }
        if let Some(language) = lookup("COPY_LANGUAGE").filter(|l| !l.trim().is_empty()) {
            config.language = language.trim().to_string();
        }

        Ok(config)
    }
}

fn parse_seconds(field: &str, value: &str) -> GeneratorResult<Duration> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(shared::SharedError::InvalidConfig {
            field: field.to_string(),
            value: value.to_string(),
        }
        .into()),
    }
}

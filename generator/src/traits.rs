//! Service trait definitions for dependency injection

use std::time::Duration;
use async_trait::async_trait;

use shared::{ApiFailure, Credential, ModelId};
use crate::error::GeneratorResult;
use crate::types::{ModelInfo, ProviderResponse};

/// Remote generative model, called with an explicit credential per request
#[mockall::automock]
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Run one generation with the given credential and model
    async fn call_model(&self, credential: &Credential, model: &ModelId, prompt: &str) -> Result<ProviderResponse, ApiFailure>;

    /// List the models visible to a credential
    async fn list_models(&self, credential: &Credential) -> Result<Vec<ModelInfo>, ApiFailure>;
}

/// Competitor page text extraction
#[mockall::automock]
#[async_trait]
pub trait ContentScraper: Send + Sync {
    /// Fetch a page and return its visible text, or a marker-prefixed error message
    async fn fetch(&self, url: &str, timeout: Duration) -> String;
}

/// Persisted list of competitor URLs
#[mockall::automock]
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// All recorded URLs in insertion order; unreadable storage yields an empty list
    async fn load(&self) -> Vec<String>;

    /// Append the URL if not present; returns whether it was added
    async fn record(&self, url: &str) -> GeneratorResult<bool>;
}

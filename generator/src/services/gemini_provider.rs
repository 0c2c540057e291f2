//! Gemini model provider
//!
//! Every request carries the credential it was called with; the provider keeps
//! no notion of a "current" key, so rotation never has to mutate shared state.

use std::time::{Duration, Instant};
use async_trait::async_trait;
use tracing::debug;

use shared::{ApiFailure, Credential, ModelId};
use crate::config::GeneratorConfig;
use crate::error::GeneratorResult;
use crate::traits::ModelProvider;
use crate::types::{ModelInfo, ProviderResponse};

/// Gemini `generateContent` REST client
pub struct GeminiProvider {
    client: reqwest::Client,
    api_base: String,
    temperature: f32,
}

impl GeminiProvider {
    /// Create new provider against the given API base URL
    pub fn new(api_base: impl Into<String>, timeout: Duration) -> GeneratorResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            temperature: 0.9,
        })
    }

    pub fn from_config(config: &GeneratorConfig) -> GeneratorResult<Self> {
        Self::new(config.api_base.clone(), config.generation_timeout)
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature.clamp(0.0, 2.0);
        self
    }

    fn map_transport_error(error: reqwest::Error) -> ApiFailure {
        if error.is_timeout() {
            ApiFailure::Timeout
        } else {
            ApiFailure::NetworkError(error.to_string())
        }
    }

    /// Classify a non-success HTTP status using the error body where it helps
    fn map_status(status: reqwest::StatusCode, body: &str, model: &str) -> ApiFailure {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| {
                json.get("error")
                    .and_then(|error| error.get("message"))
                    .and_then(|message| message.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            400 if message.to_lowercase().contains("api key") => ApiFailure::AuthenticationFailed,
            400 => ApiFailure::InvalidRequest(message),
            401 | 403 => ApiFailure::AuthenticationFailed,
            404 => ApiFailure::ModelUnavailable(model.to_string()),
            429 if message.to_lowercase().contains("quota") => ApiFailure::QuotaExceeded,
            429 => ApiFailure::RateLimitExceeded,
            503 => ApiFailure::ServiceUnavailable,
            500..=599 => ApiFailure::ServerError(message),
            _ => ApiFailure::Unknown(message),
        }
    }

    /// Token count from usage metadata, saturating at `u32::MAX`
    fn token_count(usage_metadata: Option<&serde_json::Value>, field: &str) -> u32 {
        usage_metadata
            .and_then(|u| u.get(field))
            .and_then(|t| t.as_u64())
            .map(|count| u32::try_from(count).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }

    /// Concatenate the text parts of the first candidate
    fn extract_text(response_json: &serde_json::Value) -> Result<String, ApiFailure> {
        let parts = response_json
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array());

        if let Some(parts) = parts {
            let text: String = parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                .collect();
            if !text.is_empty() {
                return Ok(text);
            }
        }

        if let Some(reason) = response_json
            .get("promptFeedback")
            .and_then(|feedback| feedback.get("blockReason"))
            .and_then(|reason| reason.as_str())
        {
            return Err(ApiFailure::ContentPolicyViolation(reason.to_string()));
        }

        Err(ApiFailure::InvalidRequest("No content in response".to_string()))
    }
}

#[async_trait]
impl ModelProvider for GeminiProvider {
    async fn call_model(&self, credential: &Credential, model: &ModelId, prompt: &str) -> Result<ProviderResponse, ApiFailure> {
        let request_start = Instant::now();

        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "temperature": self.temperature
            }
        });

        let url = format!("{}/v1beta/models/{}:generateContent", self.api_base, model);
        debug!(model = %model, credential = %credential, "Sending generateContent request");

        let response = self
            .client
            .post(&url)
            .query(&[("key", credential.expose())])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let response_time = request_start.elapsed();
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, &body, model.as_str()));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidRequest(format!("Failed to parse response: {}", e)))?;

        let text = Self::extract_text(&response_json)?;

        // Gemini doesn't always provide token counts in the response
        let usage_metadata = response_json.get("usageMetadata");
        let prompt_tokens = Self::token_count(usage_metadata, "promptTokenCount");
        let completion_tokens = Self::token_count(usage_metadata, "candidatesTokenCount");

        Ok(ProviderResponse {
            text,
            prompt_tokens,
            completion_tokens,
            model_used: model.clone(),
            response_time,
        })
    }

    async fn list_models(&self, credential: &Credential) -> Result<Vec<ModelInfo>, ApiFailure> {
        let url = format!("{}/v1beta/models", self.api_base);

        let response = self
            .client
            .get(&url)
            .query(&[("key", credential.expose())])
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_status(status, &body, "models"));
        }

        let response_json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidRequest(format!("Failed to parse response: {}", e)))?;

        let models = response_json
            .get("models")
            .and_then(|models| models.as_array())
            .map(|models| {
                models
                    .iter()
                    .filter_map(|model| {
                        let name = model.get("name")?.as_str()?;
                        Some(ModelInfo {
                            name: name.strip_prefix("models/").unwrap_or(name).to_string(),
                            display_name: model
                                .get("displayName")
                                .and_then(|d| d.as_str())
                                .map(str::to_string),
                            supported_generation_methods: model
                                .get("supportedGenerationMethods")
                                .and_then(|m| m.as_array())
                                .map(|methods| {
                                    methods
                                        .iter()
                                        .filter_map(|m| m.as_str().map(str::to_string))
                                        .collect()
                                })
                                .unwrap_or_default(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(models)
    }
}

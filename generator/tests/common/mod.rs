//! Shared helpers for generator integration tests

#![allow(dead_code)] // Not every test binary uses every helper

use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;

use generator::{ModelProvider, ModelInfo, ProviderResponse};
use shared::{ApiFailure, Credential, ModelId};

/// Provider that records every call and succeeds only for configured (credential, model) pairs
///
/// Every other call fails with `ServerError("<credential>/<model>")` so a failure can be
/// traced back to the attempt that produced it.
pub struct ScriptedProvider {
    working: Vec<(String, String)>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedProvider {
    pub fn failing() -> Self {
        Self {
            working: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn attempt_failure(credential: &str, model: &str) -> ApiFailure {
        ApiFailure::ServerError(format!("{credential}/{model}"))
    }

    pub fn working_on(mut self, credential: &str, model: &str) -> Self {
        self.working.push((credential.to_string(), model.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn call_model(&self, credential: &Credential, model: &ModelId, _prompt: &str) -> Result<ProviderResponse, ApiFailure> {
        let call = (credential.expose().to_string(), model.to_string());
        self.calls.lock().unwrap().push(call.clone());

        if self.working.contains(&call) {
            Ok(ProviderResponse {
                text: format!("ok from {}", call.0),
                prompt_tokens: 0,
                completion_tokens: 0,
                model_used: model.clone(),
                response_time: Duration::from_millis(1),
            })
        } else {
            Err(Self::attempt_failure(&call.0, &call.1))
        }
    }

    async fn list_models(&self, _credential: &Credential) -> Result<Vec<ModelInfo>, ApiFailure> {
        Ok(Vec::new())
    }
}

/// Numbered credential values `key-1` .. `key-n`
pub fn numbered_keys(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("key-{i}")).collect()
}

//! Credential and model rotation
//!
//! Attempts run strictly in order: every model of the first credential, then
//! every model of the next one. The first success wins. A credential that
//! failed is not retried within the same call and there is no delay between
//! attempts; each attempt is bounded by the provider's own request timeout.

use tracing::{debug, info, warn};

use shared::{ApiFailure, CredentialList, ModelCandidates};
use crate::error::{GeneratorError, GeneratorResult};
use crate::traits::ModelProvider;
use crate::types::{AttemptOutcome, GenerationOutcome, GenerationRequest};

/// Rotation engine over an injected model provider
pub struct GenerationClient<P>
where
    P: ModelProvider,
{
    provider: P,
    models: ModelCandidates,
}

impl<P> GenerationClient<P>
where
    P: ModelProvider,
{
    pub fn new(provider: P, models: ModelCandidates) -> Self {
        Self { provider, models }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn models(&self) -> &ModelCandidates {
        &self.models
    }

    /// Upper bound on underlying calls for a credential list
    pub fn max_attempts(&self, credentials: &CredentialList) -> usize {
        credentials.len() * self.models.ordered().len()
    }

    /// Run the request through every credential × model until one succeeds
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        credentials: &CredentialList,
    ) -> GeneratorResult<GenerationOutcome> {
        if credentials.is_empty() {
            return Err(GeneratorError::Unconfigured);
        }

        let mut attempts = 0usize;
        let mut last_failure: Option<ApiFailure> = None;

        for (index, credential) in credentials.iter().enumerate() {
            let position = index + 1;

            for model in self.models.ordered() {
                attempts += 1;
                debug!(credential = position, model = %model, attempt = attempts, "Attempting generation");

                let outcome: AttemptOutcome = self
                    .provider
                    .call_model(credential, model, request.as_str())
                    .await
                    .into();

                match outcome {
                    AttemptOutcome::Success(response) => {
                        info!(
                            credential = position,
                            model = %response.model_used,
                            attempts = attempts,
                            tokens = response.tokens_used(),
                            elapsed_ms = response.response_time.as_millis() as u64,
                            "Generation succeeded"
                        );
                        return Ok(GenerationOutcome {
                            response,
                            credential_position: position,
                            attempts,
                        });
                    }
                    AttemptOutcome::Retryable(failure) => {
                        warn!(credential = position, model = %model, error = %failure, "Generation attempt failed");
                        last_failure = Some(failure);
                    }
                }
            }
        }

        // Non-empty credential list means at least one attempt ran
        let last_failure = last_failure.unwrap_or_else(|| ApiFailure::Unknown("no attempt was made".to_string()));
        warn!(attempts = attempts, error = %last_failure, "All credentials exhausted");

        Err(GeneratorError::Exhausted { attempts, last_failure })
    }
}

//! Submission handling: validation, history, scraping, prompting, rotation, decoding

use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::{info, warn};

use shared::{ApiFailure, CredentialList};
use crate::core::prompt::PromptBuilder;
use crate::core::rotation::GenerationClient;
use crate::error::{GeneratorError, GeneratorResult};
use crate::services::credential_store::CredentialStore;
use crate::services::response_processor;
use crate::state::SessionContext;
use crate::traits::{ContentScraper, HistoryStore, ModelProvider};
use crate::types::{
    FieldSuggestions, GeneratedPage, GenerationRequest, ModelInfo, ProductBrief, ProductCategory, Tone,
    COPY_DRAFT_FILE_NAME,
};

/// Prompt used to probe whether a credential works
pub const PROBE_PROMPT: &str = "Hello, are you working?";

/// One landing page submission
#[derive(Debug, Clone, Default)]
pub struct GenerationForm {
    pub brief: ProductBrief,
    pub tone: Tone,
    pub category: ProductCategory,
    pub boosters: bool,
    pub competitor_url: Option<String>,
    /// Credentials typed with this submission; may be empty
    pub api_keys: Vec<String>,
}

/// Per-credential probe result
#[derive(Debug, Clone, PartialEq)]
pub struct CredentialCheck {
    pub position: usize,
    pub masked: String,
    pub result: Result<String, ApiFailure>,
}

/// Landing page generator with dependency injection
pub struct LandingPageGenerator<P, S, H>
where
    P: ModelProvider,
    S: ContentScraper,
    H: HistoryStore,
{
    pub client: GenerationClient<P>,
    pub scraper: S,
    pub history: H,
    pub credentials: CredentialStore,
    pub prompts: PromptBuilder,
    pub scrape_timeout: Duration,
}

impl<P, S, H> LandingPageGenerator<P, S, H>
where
    P: ModelProvider,
    S: ContentScraper,
    H: HistoryStore,
{
    pub fn new(
        client: GenerationClient<P>,
        scraper: S,
        history: H,
        credentials: CredentialStore,
        prompts: PromptBuilder,
        scrape_timeout: Duration,
    ) -> Self {
        Self {
            client,
            scraper,
            history,
            credentials,
            prompts,
            scrape_timeout,
        }
    }

    fn require_credentials(&self, session: &mut SessionContext, api_keys: &[String]) -> GeneratorResult<CredentialList> {
        let credentials = self.credentials.resolve(session, api_keys);
        if credentials.is_empty() {
            return Err(GeneratorError::Unconfigured);
        }
        Ok(credentials)
    }

    /// Ask the model for target audience, CTA and description of a product
    pub async fn suggest_fields(
        &self,
        session: &mut SessionContext,
        product_name: &str,
        api_keys: &[String],
    ) -> GeneratorResult<FieldSuggestions> {
        if product_name.trim().is_empty() {
            return Err(GeneratorError::MissingProductName);
        }
        let credentials = self.require_credentials(session, api_keys)?;

        let request = self.prompts.build_suggestion_request(product_name);
        let outcome = self.client.generate(&request, &credentials).await?;
        let suggestions = response_processor::parse_suggestions(&outcome.response.text)?;

        session.remember_suggestions(product_name, &suggestions);
        info!(product = product_name.trim(), "Filled marketing fields from suggestions");
        Ok(suggestions)
    }

    /// Handle one landing page submission
    pub async fn generate_page(&self, session: &mut SessionContext, form: GenerationForm) -> GeneratorResult<GeneratedPage> {
        let GenerationForm {
            mut brief,
            tone,
            category,
            boosters,
            competitor_url,
            api_keys,
        } = form;

        if brief.name.trim().is_empty() {
            return Err(GeneratorError::MissingProductName);
        }

        let competitor_url = competitor_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        if let Some(url) = &competitor_url {
            if let Err(e) = self.history.record(url).await {
                warn!(url = url.as_str(), error = %e, "Could not record competitor URL");
            }
        }

        let credentials = self.require_credentials(session, &api_keys)?;

        session.apply_echoes(&mut brief);
        session.remember_brief(&brief);

        let competitor_extract = match &competitor_url {
            Some(url) => Some(self.scraper.fetch(url, self.scrape_timeout).await),
            None => None,
        };

        let request: GenerationRequest =
            self.prompts
                .build(&brief, tone, boosters, competitor_extract.as_deref(), category);

        info!(
            product = brief.name.trim(),
            credentials = credentials.len(),
            competitor = competitor_url.is_some(),
            "Generating landing page"
        );

        let outcome = self.client.generate(&request, &credentials).await?;
        let parsed = response_processor::parse(&outcome.response.text);

        Ok(GeneratedPage {
            parsed,
            model_used: outcome.response.model_used,
            credential_position: outcome.credential_position,
            attempts: outcome.attempts,
        })
    }

    /// Stored competitor URLs
    pub async fn competitor_history(&self) -> Vec<String> {
        self.history.load().await
    }

    /// Models visible to the first resolved credential
    pub async fn list_models(&self, session: &mut SessionContext, api_keys: &[String]) -> GeneratorResult<Vec<ModelInfo>> {
        let credentials = self.require_credentials(session, api_keys)?;
        let credential = credentials.first().ok_or(GeneratorError::Unconfigured)?;

        self.client
            .provider()
            .list_models(credential)
            .await
            .map_err(|reason| GeneratorError::Provider { reason })
    }

    /// Probe every resolved credential with the primary model
    pub async fn check_credentials(
        &self,
        session: &mut SessionContext,
        api_keys: &[String],
    ) -> GeneratorResult<Vec<CredentialCheck>> {
        let credentials = self.require_credentials(session, api_keys)?;
        let model = &self.client.models().primary;

        let mut checks = Vec::with_capacity(credentials.len());
        for (index, credential) in credentials.iter().enumerate() {
            let result = self
                .client
                .provider()
                .call_model(credential, model, PROBE_PROMPT)
                .await
                .map(|response| response.text.trim().to_string());

            checks.push(CredentialCheck {
                position: index + 1,
                masked: credential.masked(),
                result,
            });
        }

        Ok(checks)
    }
}

/// Write the page and, when present, the copy draft; returns the written paths
pub async fn write_artifacts(page: &GeneratedPage, output_dir: &Path) -> GeneratorResult<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).await?;

    let artifact = page.artifact();
    let page_path = output_dir.join(artifact.file_name);
    fs::write(&page_path, artifact.body.as_bytes()).await?;
    let mut written = vec![page_path];

    if !page.parsed.copy_fields.is_empty() {
        let draft_path = output_dir.join(COPY_DRAFT_FILE_NAME);
        fs::write(&draft_path, response_processor::render_copy_draft(&page.parsed.copy_fields)).await?;
        written.push(draft_path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use crate::core::prompt::{INFER_DESCRIPTION, INFER_TARGET_AUDIENCE};
    use shared::{Credential, ModelCandidates, ModelId};
    use crate::traits::{MockContentScraper, MockHistoryStore, MockModelProvider};
    use crate::types::ProviderResponse;

    const PAGE_JSON: &str = r#"{"html_code": "<html><body>Hi</body></html>", "copywriting": {"headline": "Hi"}}"#;

    fn response(model: &ModelId, text: &str) -> ProviderResponse {
        ProviderResponse {
            text: text.to_string(),
            prompt_tokens: 1,
            completion_tokens: 1,
            model_used: model.clone(),
            response_time: Duration::from_millis(1),
        }
    }

    fn generator(
        provider: MockModelProvider,
        scraper: MockContentScraper,
        history: MockHistoryStore,
        defaults: CredentialList,
    ) -> LandingPageGenerator<MockModelProvider, MockContentScraper, MockHistoryStore> {
        LandingPageGenerator::new(
            GenerationClient::new(provider, ModelCandidates::default()),
            scraper,
            history,
            CredentialStore::new(defaults),
            PromptBuilder::default(),
            Duration::from_secs(1),
        )
    }

    #[tokio::test]
    async fn test_missing_name_touches_nothing() {
        let mut provider = MockModelProvider::new();
        provider.expect_call_model().times(0);
        let mut history = MockHistoryStore::new();
        history.expect_record().times(0);

        let generator = generator(provider, MockContentScraper::new(), history, CredentialList::from_input(["k"]));
        let mut session = SessionContext::new();
        let form = GenerationForm {
            brief: ProductBrief::new("   "),
            competitor_url: Some("https://rival.example".to_string()),
            ..GenerationForm::default()
        };

        let result = generator.generate_page(&mut session, form).await;

        assert!(matches!(result, Err(GeneratorError::MissingProductName)));
        assert!(session.retained_credentials().is_empty());
    }

    #[tokio::test]
    async fn test_unconfigured_still_records_history() {
        let mut provider = MockModelProvider::new();
        provider.expect_call_model().times(0);
        let mut history = MockHistoryStore::new();
        history
            .expect_record()
            .withf(|url: &str| url == "https://rival.example")
            .times(1)
            .returning(|_| Ok(true));
        let mut scraper = MockContentScraper::new();
        scraper.expect_fetch().times(0);

        let generator = generator(provider, scraper, history, CredentialList::empty());
        let mut session = SessionContext::new();
        let form = GenerationForm {
            brief: ProductBrief::new("Ebook"),
            competitor_url: Some(" https://rival.example ".to_string()),
            ..GenerationForm::default()
        };

        let result = generator.generate_page(&mut session, form).await;

        assert!(matches!(result, Err(GeneratorError::Unconfigured)));
    }

    #[tokio::test]
    async fn test_competitor_extract_reaches_prompt() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_call_model()
            .withf(|_, _, prompt: &str| prompt.contains("RIVAL HEADLINE"))
            .times(1)
            .returning(|_, model, _| Ok(response(model, PAGE_JSON)));
        let mut scraper = MockContentScraper::new();
        scraper
            .expect_fetch()
            .times(1)
            .returning(|_, _| "RIVAL HEADLINE".to_string());
        let mut history = MockHistoryStore::new();
        history.expect_record().returning(|_| Ok(true));

        let generator = generator(provider, scraper, history, CredentialList::from_input(["k"]));
        let mut session = SessionContext::new();
        let form = GenerationForm {
            brief: ProductBrief::new("Ebook"),
            competitor_url: Some("https://rival.example".to_string()),
            ..GenerationForm::default()
        };

        let page = generator.generate_page(&mut session, form).await.unwrap();

        assert!(!page.parsed.decode_failed);
        assert_eq!(page.parsed.document_markup, "<html><body>Hi</body></html>");
        assert_eq!(page.attempts, 1);
        assert_eq!(session.retained_credentials().len(), 1);
    }

    #[tokio::test]
    async fn test_suggestions_become_session_echoes() {
        let mut provider = MockModelProvider::new();
        provider.expect_call_model().times(1).returning(|_, model, _| {
            Ok(response(
                model,
                r#"{"target_audience": "runners", "cta_text": "Order now", "product_desc": "Light shoe"}"#,
            ))
        });

        let generator = generator(
            provider,
            MockContentScraper::new(),
            MockHistoryStore::new(),
            CredentialList::from_input(["k"]),
        );
        let mut session = SessionContext::new();

        let suggestions = generator
            .suggest_fields(&mut session, "Shoe", &[])
            .await
            .unwrap();

        assert_eq!(suggestions.target_audience, "runners");
        assert_eq!(session.cta_text(), "Order now");
        assert_eq!(session.product_desc(), "Light shoe");
    }

    #[tokio::test]
    async fn test_check_credentials_reports_each_key() {
        let mut provider = MockModelProvider::new();
        provider
            .expect_call_model()
            .withf(|credential: &Credential, _, _| credential.expose() == "first-key-abcdef")
            .returning(|_, model, _| Ok(response(model, " yes ")));
        provider
            .expect_call_model()
            .withf(|credential: &Credential, _, _| credential.expose() == "second-key-ghijkl")
            .returning(|_, _, _| Err(ApiFailure::AuthenticationFailed));

        let generator = generator(
            provider,
            MockContentScraper::new(),
            MockHistoryStore::new(),
            CredentialList::empty(),
        );
        let mut session = SessionContext::new();
        let keys = vec!["first-key-abcdef".to_string(), "second-key-ghijkl".to_string()];

        let checks = generator.check_credentials(&mut session, &keys).await.unwrap();

        assert_eq!(checks.len(), 2);
        assert_eq!(checks[0].result, Ok("yes".to_string()));
        assert_eq!(checks[1].position, 2);
        assert_eq!(checks[1].result, Err(ApiFailure::AuthenticationFailed));
        assert_eq!(checks[1].masked, "secon...hijkl");
    }

    #[tokio::test]
    async fn test_second_submission_infers_its_own_blank_fields() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&prompts);
        let mut provider = MockModelProvider::new();
        provider.expect_call_model().times(2).returning(move |_, model, prompt| {
            recorded.lock().unwrap().push(prompt.to_string());
            Ok(response(model, PAGE_JSON))
        });

        let generator = generator(
            provider,
            MockContentScraper::new(),
            MockHistoryStore::new(),
            CredentialList::from_input(["k"]),
        );
        let mut session = SessionContext::new();

        let mut sneakers = ProductBrief::new("Waterproof Sneakers");
        sneakers.description = "Sneakers that keep feet dry".to_string();
        sneakers.target_audience = "hikers".to_string();
        let first = GenerationForm {
            brief: sneakers,
            ..GenerationForm::default()
        };
        let second = GenerationForm {
            brief: ProductBrief::new("Python Ebook"),
            ..GenerationForm::default()
        };

        generator.generate_page(&mut session, first).await.unwrap();
        generator.generate_page(&mut session, second).await.unwrap();

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].contains("Sneakers that keep feet dry"));
        assert!(prompts[1].contains(INFER_DESCRIPTION));
        assert!(prompts[1].contains(INFER_TARGET_AUDIENCE));
        assert!(!prompts[1].contains("Sneakers that keep feet dry"));
        assert!(!prompts[1].contains("hikers"));
    }

    #[tokio::test]
    async fn test_suggestions_fill_blanks_of_matching_product_once() {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let recorded = Arc::clone(&prompts);
        let mut provider = MockModelProvider::new();
        provider
            .expect_call_model()
            .withf(|_, _, prompt: &str| prompt.contains("Give marketing ideas"))
            .times(1)
            .returning(|_, model, _| {
                Ok(response(
                    model,
                    r#"{"target_audience": "runners", "cta_text": "Order now", "product_desc": "Light shoe"}"#,
                ))
            });
        provider
            .expect_call_model()
            .withf(|_, _, prompt: &str| !prompt.contains("Give marketing ideas"))
            .times(2)
            .returning(move |_, model, prompt| {
                recorded.lock().unwrap().push(prompt.to_string());
                Ok(response(model, PAGE_JSON))
            });

        let generator = generator(
            provider,
            MockContentScraper::new(),
            MockHistoryStore::new(),
            CredentialList::from_input(["k"]),
        );
        let mut session = SessionContext::new();

        generator.suggest_fields(&mut session, "Shoe", &[]).await.unwrap();
        for _ in 0..2 {
            let form = GenerationForm {
                brief: ProductBrief::new("Shoe"),
                ..GenerationForm::default()
            };
            generator.generate_page(&mut session, form).await.unwrap();
        }

        let prompts = prompts.lock().unwrap();
        assert!(prompts[0].contains("- Description: Light shoe"));
        assert!(prompts[1].contains(INFER_DESCRIPTION));
    }

    #[tokio::test]
    async fn test_write_artifacts_skips_empty_copy() {
        let dir = tempfile::tempdir().unwrap();
        let page = GeneratedPage {
            parsed: response_processor::parse("<html>raw</html>"),
            model_used: ModelId::parse("gemini-2.0-flash").unwrap(),
            credential_position: 1,
            attempts: 1,
        };

        let written = write_artifacts(&page, dir.path()).await.unwrap();

        assert_eq!(written.len(), 1);
        let body = std::fs::read_to_string(dir.path().join("landing_page.html")).unwrap();
        assert_eq!(body, "<html>raw</html>");
    }
}

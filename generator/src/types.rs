//! Generator-specific data types

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use shared::{ApiFailure, ModelId};

/// File name offered for the generated page
pub const ARTIFACT_FILE_NAME: &str = "landing_page.html";

/// Content type of the generated page
pub const ARTIFACT_CONTENT_TYPE: &str = "text/html";

/// File name of the plain-text copy draft written next to the page
pub const COPY_DRAFT_FILE_NAME: &str = "copywriting.txt";

/// Prompt sent to the model; built once per submission and never mutated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest(String);

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self(prompt.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider response data
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub model_used: ModelId,
    pub response_time: Duration,
}

impl ProviderResponse {
    pub fn tokens_used(&self) -> u32 {
        self.prompt_tokens.saturating_add(self.completion_tokens)
    }
}

/// Result of a single (credential, model) attempt
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptOutcome {
    Success(ProviderResponse),
    Retryable(ApiFailure),
}

impl From<Result<ProviderResponse, ApiFailure>> for AttemptOutcome {
    fn from(result: Result<ProviderResponse, ApiFailure>) -> Self {
        match result {
            Ok(response) => AttemptOutcome::Success(response),
            Err(failure) => AttemptOutcome::Retryable(failure),
        }
    }
}

/// Successful rotation: the response plus where in the rotation it came from
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub response: ProviderResponse,
    /// 1-based position of the credential that succeeded
    pub credential_position: usize,
    /// Underlying calls made, including the successful one
    pub attempts: usize,
}

/// Model listing entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub display_name: Option<String>,
    pub supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    pub fn supports_generate_content(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|method| method == "generateContent")
    }
}

/// Copywriting tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Tone {
    Professional,
    Casual,
    HardSelling,
    Emotional,
    Humorous,
    #[default]
    Personal,
}

impl Tone {
    pub fn description(&self) -> &'static str {
        match self {
            Tone::Professional => "Professional and authoritative",
            Tone::Casual => "Relaxed and friendly, everyday slang",
            Tone::HardSelling => "Persuasive hard selling",
            Tone::Emotional => "Emotional and heart-touching",
            Tone::Humorous => "Funny and humorous",
            Tone::Personal => "Personal confession, deep talk",
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

/// Product category, selects the page structure template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Ebooks, courses and other digital products
    #[default]
    Digital,
    /// Physical goods
    Physical,
}

/// Product data entered by the user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBrief {
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub cta_text: String,
}

impl ProductBrief {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fill blank fields from suggestions, keeping anything the user typed
    pub fn fill_blanks(&mut self, suggestions: &FieldSuggestions) {
        if self.target_audience.trim().is_empty() {
            self.target_audience = suggestions.target_audience.clone();
        }
        if self.cta_text.trim().is_empty() {
            self.cta_text = suggestions.cta_text.clone();
        }
        if self.description.trim().is_empty() {
            self.description = suggestions.product_desc.clone();
        }
    }
}

/// Marketing field suggestions for a product name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSuggestions {
    #[serde(default)]
    pub target_audience: String,
    #[serde(default)]
    pub cta_text: String,
    #[serde(default)]
    pub product_desc: String,
}

/// A copy field value: a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CopyValue {
    Text(String),
    List(Vec<String>),
}

/// Named copywriting fields (headline, benefits, ...)
pub type CopyFields = BTreeMap<String, CopyValue>;

/// Decoded model output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedOutput {
    pub document_markup: String,
    pub copy_fields: CopyFields,
    /// Copy could not be separated from markup; the raw text became the document
    pub decode_failed: bool,
}

/// Downloadable page document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl Artifact {
    pub fn landing_page(body: impl Into<String>) -> Self {
        Self {
            file_name: ARTIFACT_FILE_NAME,
            content_type: ARTIFACT_CONTENT_TYPE,
            body: body.into(),
        }
    }
}

/// Everything one generation produced
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPage {
    pub parsed: ParsedOutput,
    pub model_used: ModelId,
    pub credential_position: usize,
    pub attempts: usize,
}

impl GeneratedPage {
    pub fn artifact(&self) -> Artifact {
        Artifact::landing_page(self.parsed.document_markup.clone())
    }
}

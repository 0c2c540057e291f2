//! Session state management
//!
//! A session lives as long as one user keeps interacting with the generator.
//! It remembers the credentials that were last resolved and echoes the last
//! marketing fields. Suggested fields fill the blanks of the next submission
//! for the same product only; a submitted brief consumes them.

use shared::CredentialList;
use crate::types::{FieldSuggestions, ProductBrief};

/// Explicit per-session context, owned by the caller driving the workflow
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    retained_credentials: CredentialList,
    target_audience: String,
    cta_text: String,
    product_desc: String,
    /// Product the current echoes were suggested for, until a brief consumes them
    suggested_for: Option<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn retained_credentials(&self) -> &CredentialList {
        &self.retained_credentials
    }

    pub fn retain_credentials(&mut self, credentials: CredentialList) {
        self.retained_credentials = credentials;
    }

    pub fn target_audience(&self) -> &str {
        &self.target_audience
    }

    pub fn cta_text(&self) -> &str {
        &self.cta_text
    }

    pub fn product_desc(&self) -> &str {
        &self.product_desc
    }

    /// Store suggestions for a product as the current field echoes
    pub fn remember_suggestions(&mut self, product_name: &str, suggestions: &FieldSuggestions) {
        self.target_audience = suggestions.target_audience.clone();
        self.cta_text = suggestions.cta_text.clone();
        self.product_desc = suggestions.product_desc.clone();
        self.suggested_for = Some(product_name.trim().to_string());
    }

    /// Store the fields of a submitted brief as the current echoes; pending suggestions are consumed
    pub fn remember_brief(&mut self, brief: &ProductBrief) {
        self.target_audience = brief.target_audience.clone();
        self.cta_text = brief.cta_text.clone();
        self.product_desc = brief.description.clone();
        self.suggested_for = None;
    }

    /// Fill blank fields of a brief from pending suggestions for the same product
    pub fn apply_echoes(&self, brief: &mut ProductBrief) {
        if self.suggested_for.as_deref() != Some(brief.name.trim()) {
            return;
        }
        brief.fill_blanks(&FieldSuggestions {
            target_audience: self.target_audience.clone(),
            cta_text: self.cta_text.clone(),
            product_desc: self.product_desc.clone(),
        });
    }
}

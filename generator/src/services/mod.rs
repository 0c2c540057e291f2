//! Generator services implementations

pub mod content_scraper;
pub mod credential_store;
pub mod gemini_provider;
pub mod history_store;
pub mod response_processor;

#[cfg(test)]
pub mod tests;

pub use content_scraper::{RealContentScraper, MAX_EXTRACT_CHARS, SCRAPE_FAILURE_MARKER};
pub use credential_store::{CredentialSource, CredentialStore};
pub use gemini_provider::GeminiProvider;
pub use history_store::RealHistoryStore;

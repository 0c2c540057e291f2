//! Landing page generator library
//!
//! Builds a copywriting + page prompt from product data (optionally seeded with a
//! scraped competitor page), runs it through an ordered rotation of Gemini
//! credentials and models, and decodes the structured response into a
//! standalone HTML document plus copy fields.

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod state;
pub mod traits;
pub mod types;

// Re-export main types
pub use config::GeneratorConfig;
pub use error::{GeneratorError, GeneratorResult};
pub use state::SessionContext;
pub use traits::*;
pub use types::*;
pub use self::core::{GenerationClient, GenerationForm, LandingPageGenerator, PromptBuilder};
pub use services::{CredentialStore, GeminiProvider, RealContentScraper, RealHistoryStore};

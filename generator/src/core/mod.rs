//! Generator core business logic

pub mod prompt;
pub mod rotation;
pub mod workflow;

pub use prompt::PromptBuilder;
pub use rotation::GenerationClient;
pub use workflow::{write_artifacts, CredentialCheck, GenerationForm, LandingPageGenerator, PROBE_PROMPT};

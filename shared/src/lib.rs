//! Shared types for the landing page generator
//!
//! Contains the credential and model identifier types that every component
//! threads through the rotation engine, the provider failure taxonomy and
//! the tracing setup used by the binary.

pub mod types;
pub mod errors;
pub mod logging;

pub use types::*;
pub use errors::*;

//! Shared error types for the landing page generator

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Too many credentials: {count} supplied, at most {max} are used")]
    TooManyCredentials { count: usize, max: usize },

    #[error("Invalid model identifier: {input:?}")]
    InvalidModel { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

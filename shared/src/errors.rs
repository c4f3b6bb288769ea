//! Shared error types for the blog post pipeline

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Missing credential: {message}")]
    MissingCredential { message: String },

    #[error("Unknown provider: {input}")]
    UnknownProvider { input: String },

    #[error("Invalid UUID: {input}")]
    InvalidUuid { input: String },
}

pub type SharedResult<T> = Result<T, SharedError>;

//! Provider error types

use thiserror::Error;
use shared::{ProviderId, SharedError};

/// Result type for provider setup operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors raised while building a model client.
///
/// Failures of an individual request are reported as [`shared::ApiFailure`].
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing API key for provider {provider}")]
    MissingApiKey { provider: ProviderId },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Shared component error: {0}")]
    Shared(#[from] SharedError),
}

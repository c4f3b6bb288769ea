//! Provider trait definitions for dependency injection

use async_trait::async_trait;

use shared::ApiFailure;
use crate::types::ModelResponse;

/// A text-generation backend: one prompt in, one response out.
///
/// Implementations must not retry; every failure is reported to the caller.
#[mockall::automock]
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a fully formed prompt and wait for the complete response
    async fn generate(&self, prompt: &str) -> Result<ModelResponse, ApiFailure>;
}

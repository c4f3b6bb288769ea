//! Provider-specific data types

use std::time::Duration;
use shared::TokenUsage;

/// Provider response data
#[derive(Debug, Clone, PartialEq)]
pub struct ModelResponse {
    pub content: String,
    pub usage: TokenUsage,
    pub model_used: String,
    pub response_time: Duration,
}

impl ModelResponse {
    /// Response with no usage or timing information, mainly for stubs
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            model_used: String::new(),
            response_time: Duration::ZERO,
        }
    }

    pub fn with_usage(mut self, usage: TokenUsage) -> Self {
        self.usage = usage;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_used = model.into();
        self
    }
}

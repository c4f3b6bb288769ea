//! Core shared types and identifiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;
use std::str::FromStr;
use uuid::Uuid;

use crate::errors::{SharedError, SharedResult};

/// Unique identifier for a single pipeline run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> SharedResult<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| SharedError::InvalidUuid { input: s.to_string() })
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text-generation backends the pipeline can talk to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderId {
    OpenAI,
    Anthropic,
    Gemini,
    /// Offline placeholder text, no network and no credential
    Random,
}

impl ProviderId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderId::OpenAI => "openai",
            ProviderId::Anthropic => "anthropic",
            ProviderId::Gemini => "gemini",
            ProviderId::Random => "random",
        }
    }

    /// Environment variables holding this provider's credential, in lookup order
    pub fn credential_env_vars(&self) -> &'static [&'static str] {
        match self {
            ProviderId::OpenAI => &["OPENAI_API_KEY"],
            ProviderId::Anthropic => &["ANTHROPIC_API_KEY"],
            ProviderId::Gemini => &["GOOGLE_API_KEY", "GOOGLE_AI_API_KEY"],
            ProviderId::Random => &[],
        }
    }

    pub fn requires_credential(&self) -> bool {
        !matches!(self, ProviderId::Random)
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(ProviderId::OpenAI),
            "anthropic" | "claude" => Ok(ProviderId::Anthropic),
            "gemini" | "google" => Ok(ProviderId::Gemini),
            "random" => Ok(ProviderId::Random),
            _ => Err(SharedError::UnknownProvider { input: s.to_string() }),
        }
    }
}

/// Provider configuration with model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct ProviderConfig {
    pub provider: ProviderId,
    pub model: String,
}

impl ProviderConfig {
    pub fn new(provider: ProviderId, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    pub fn with_default_model(provider: ProviderId) -> Self {
        let model = match provider {
            ProviderId::OpenAI => "gpt-4o-mini",
            ProviderId::Anthropic => "claude-3-5-sonnet-latest",
            ProviderId::Gemini => "gemini-1.5-flash",
            ProviderId::Random => "random",
        };
        Self::new(provider, model)
    }
}

impl fmt::Display for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

/// Request configuration for provider calls
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl RequestConfig {
    pub fn validate(&self) -> SharedResult<()> {
        if self.max_tokens == 0 {
            return Err(SharedError::InvalidConfig {
                field: "max_tokens".to_string(),
                value: self.max_tokens.to_string(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(SharedError::InvalidConfig {
                field: "temperature".to_string(),
                value: self.temperature.to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(SharedError::InvalidConfig {
                field: "timeout_seconds".to_string(),
                value: self.timeout_seconds.to_string(),
            });
        }
        Ok(())
    }
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.7,
            timeout_seconds: 120,
        }
    }
}

/// Provider credential. Never printed in full.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Rejects empty or whitespace-only credentials
    pub fn new(value: impl Into<String>) -> SharedResult<Self> {
        let value = value.into().trim().to_string();
        if value.is_empty() {
            return Err(SharedError::MissingCredential {
                message: "API key must not be empty".to_string(),
            });
        }
        Ok(Self(value))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First four and last four characters, for diagnostics
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.0.chars().collect();
        if chars.len() > 12 {
            let head: String = chars[..4].iter().collect();
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{head}...{tail}")
        } else {
            "***".to_string()
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&self.masked()).finish()
    }
}

/// Token usage information for model requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

impl AddAssign for TokenUsage {
    fn add_assign(&mut self, other: Self) {
        self.input_tokens += other.input_tokens;
        self.output_tokens += other.output_tokens;
    }
}

/// API failure reasons for model provider requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiFailure {
    /// Authentication failed (missing or invalid API key)
    AuthenticationFailed,
    /// Rate limit exceeded
    RateLimitExceeded,
    /// Invalid request format or parameters, or an unreadable response
    InvalidRequest(String),
    /// Model not found or unavailable
    ModelUnavailable(String),
    /// Network/connection error
    NetworkError(String),
    /// Server error from provider
    ServerError(String),
    /// Request timeout
    Timeout,
    /// Service temporarily unavailable
    ServiceUnavailable,
}

impl fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiFailure::AuthenticationFailed => write!(f, "authentication failed"),
            ApiFailure::RateLimitExceeded => write!(f, "rate limit exceeded"),
            ApiFailure::InvalidRequest(detail) => write!(f, "invalid request: {detail}"),
            ApiFailure::ModelUnavailable(model) => write!(f, "model unavailable: {model}"),
            ApiFailure::NetworkError(detail) => write!(f, "network error: {detail}"),
            ApiFailure::ServerError(status) => write!(f, "server error: {status}"),
            ApiFailure::Timeout => write!(f, "request timed out"),
            ApiFailure::ServiceUnavailable => write!(f, "service unavailable"),
        }
    }
}

//! Run configuration resolved from defaults, environment and CLI overrides
//!
//! ## Sources (lowest to highest precedence)
//! 1. Built-in defaults (Gemini, temperature 0.7, 2048 tokens, 120 s timeout)
//! 2. `.env` file and process environment
//! 3. Explicit overrides, usually from command line flags
//!
//! ## Environment keys
//! - `BLOG_PROVIDER`: openai, anthropic, gemini or random
//! - `BLOG_MODEL`, `BLOG_TEMPERATURE`, `BLOG_MAX_TOKENS`, `BLOG_TIMEOUT_SECS`, `BLOG_BASE_URL`
//! - `GOOGLE_API_KEY` / `GOOGLE_AI_API_KEY`, `OPENAI_API_KEY`, `ANTHROPIC_API_KEY`
//!
//! Resolution itself is a pure function over a key lookup; only
//! [`WorkflowConfig::from_env`] touches the process environment.

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;

use provider::RealModelClient;
use shared::{ApiKey, ProviderConfig, ProviderId, RequestConfig, SharedError};

use crate::error::{OrchestratorError, OrchestratorResult};
use crate::orchestrator::WorkflowSettings;

pub const PROVIDER_ENV: &str = "BLOG_PROVIDER";
pub const MODEL_ENV: &str = "BLOG_MODEL";
pub const TEMPERATURE_ENV: &str = "BLOG_TEMPERATURE";
pub const MAX_TOKENS_ENV: &str = "BLOG_MAX_TOKENS";
pub const TIMEOUT_ENV: &str = "BLOG_TIMEOUT_SECS";
pub const BASE_URL_ENV: &str = "BLOG_BASE_URL";

/// Values that win over anything found in the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<ProviderId>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
    pub base_url: Option<String>,
}

/// Everything needed to build a client and run the pipeline
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    pub provider: ProviderConfig,
    pub api_key: Option<ApiKey>,
    pub request: RequestConfig,
    pub base_url: Option<String>,
    pub settings: WorkflowSettings,
}

impl WorkflowConfig {
    /// Resolve from `.env` (if present) and the process environment
    pub fn from_env(overrides: &ConfigOverrides) -> OrchestratorResult<Self> {
        tolerate_missing_env_file(dotenvy::dotenv())?;
        Self::resolve(overrides, |key| std::env::var(key).ok())
    }

    /// Resolve from a `.env` style file only, leaving the process environment untouched
    pub fn from_env_file(path: &Path, overrides: &ConfigOverrides) -> OrchestratorResult<Self> {
        let iter = dotenvy::from_path_iter(path)
            .map_err(|e| OrchestratorError::config(format!("Cannot read {}: {}", path.display(), e)))?;

        let mut values = HashMap::new();
        for item in iter {
            let (key, value) =
                item.map_err(|e| OrchestratorError::config(format!("Malformed line in {}: {}", path.display(), e)))?;
            values.insert(key, value);
        }

        Self::resolve(overrides, |key| values.get(key).cloned())
    }

    /// Resolve from an arbitrary key lookup. Blank values count as unset.
    pub fn resolve<F>(overrides: &ConfigOverrides, lookup: F) -> OrchestratorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let provider_id = match overrides.provider {
            Some(provider) => provider,
            None => match get(PROVIDER_ENV) {
                Some(raw) => raw.parse::<ProviderId>()?,
                None => ProviderId::Gemini,
            },
        };

        let mut provider = ProviderConfig::with_default_model(provider_id);
        if let Some(model) = overrides.model.clone().or_else(|| get(MODEL_ENV)) {
            provider.model = model;
        }

        let defaults = RequestConfig::default();
        let request = RequestConfig {
            temperature: match overrides.temperature {
                Some(value) => value,
                None => parse_or(get(TEMPERATURE_ENV), TEMPERATURE_ENV, defaults.temperature)?,
            },
            max_tokens: match overrides.max_tokens {
                Some(value) => value,
                None => parse_or(get(MAX_TOKENS_ENV), MAX_TOKENS_ENV, defaults.max_tokens)?,
            },
            timeout_seconds: match overrides.timeout_seconds {
                Some(value) => value,
                None => parse_or(get(TIMEOUT_ENV), TIMEOUT_ENV, defaults.timeout_seconds)?,
            },
        };

        let api_key = provider_id
            .credential_env_vars()
            .iter()
            .find_map(|var| get(*var))
            .map(ApiKey::new)
            .transpose()?;

        let config = Self {
            provider,
            api_key,
            request,
            base_url: overrides.base_url.clone().or_else(|| get(BASE_URL_ENV)),
            settings: WorkflowSettings::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_settings(mut self, settings: WorkflowSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Reject a missing credential or out-of-range request values
    pub fn validate(&self) -> OrchestratorResult<()> {
        let provider = self.provider.provider;
        if provider.requires_credential() && self.api_key.is_none() {
            return Err(OrchestratorError::config(format!(
                "No API key for provider {}. Set {}",
                provider,
                provider.credential_env_vars().join(" or ")
            )));
        }
        if self.provider.model.trim().is_empty() {
            return Err(OrchestratorError::config(format!("No model configured for provider {}", provider)));
        }
        self.request.validate()?;
        Ok(())
    }

    pub fn build_client(&self) -> OrchestratorResult<RealModelClient> {
        let client = RealModelClient::new(self.provider.clone(), self.api_key.clone(), self.request.clone())?;
        Ok(match &self.base_url {
            Some(url) => client.with_base_url(url.clone()),
            None => client,
        })
    }
}

/// A missing `.env` file is fine; an unreadable or malformed one is not
fn tolerate_missing_env_file<T>(result: Result<T, dotenvy::Error>) -> OrchestratorResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(OrchestratorError::config(format!("Cannot load .env file: {e}"))),
    }
}

fn parse_or<T: FromStr>(raw: Option<String>, field: &str, default: T) -> OrchestratorResult<T> {
    match raw {
        Some(value) => value.parse::<T>().map_err(|_| {
            OrchestratorError::from(SharedError::InvalidConfig {
                field: field.to_string(),
                value,
            })
        }),
        None => Ok(default),
    }
}

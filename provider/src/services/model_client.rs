//! HTTP model client for the supported text-generation providers

use std::time::{Duration, Instant};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, warn};

use shared::{ApiFailure, ApiKey, ProviderConfig, ProviderId, RequestConfig, TokenUsage};
use crate::error::{ProviderError, ProviderResult};
use crate::traits::ModelClient;
use crate::types::ModelResponse;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Vocabulary for the offline provider
const RANDOM_WORDS: &[&str] = &[
    "orbit", "launch", "mission", "signal", "horizon", "payload", "crew", "station",
    "telescope", "gravity", "rover", "landing", "fuel", "engine", "module", "voyage",
    "future", "discovery", "research", "planet", "moon", "asteroid", "satellite", "habitat",
];

/// Real model client backed by a provider's HTTP API
#[derive(Debug, Clone)]
pub struct RealModelClient {
    http: reqwest::Client,
    provider: ProviderConfig,
    api_key: Option<ApiKey>,
    request_config: RequestConfig,
    base_url: String,
}

impl RealModelClient {
    /// Create a client for one provider and model.
    ///
    /// Fails when the request configuration is invalid or when the provider
    /// needs a credential and none was given.
    pub fn new(provider: ProviderConfig, api_key: Option<ApiKey>, request_config: RequestConfig) -> ProviderResult<Self> {
        request_config.validate()?;

        if provider.provider.requires_credential() && api_key.is_none() {
            return Err(ProviderError::MissingApiKey {
                provider: provider.provider,
            });
        }
        if provider.model.trim().is_empty() {
            return Err(ProviderError::ConfigError {
                message: format!("No model configured for provider {}", provider.provider),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_config.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: default_base_url(provider.provider).to_string(),
            provider,
            api_key,
            request_config,
        })
    }

    /// Point the client at a different endpoint (proxies, local mocks)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn provider(&self) -> &ProviderConfig {
        &self.provider
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn api_key(&self) -> Result<&str, ApiFailure> {
        self.api_key
            .as_ref()
            .map(ApiKey::expose)
            .ok_or(ApiFailure::AuthenticationFailed)
    }

    /// OpenAI chat completions request
    async fn openai_request(&self, prompt: &str) -> Result<ModelResponse, ApiFailure> {
        let api_key = self.api_key()?;
        let request_start = Instant::now();

        let request_body = serde_json::json!({
            "model": self.provider.model,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ],
            "max_tokens": self.request_config.max_tokens,
            "temperature": self.request_config.temperature
        });

        let response = self
            .http
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_failure)?;

        let response_json = self.read_json(response).await?;

        let content = response_json
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("content"))
            .and_then(|content| content.as_str())
            .ok_or_else(|| ApiFailure::InvalidRequest("No content in response".to_string()))?;

        let usage = response_json.get("usage");
        let usage = TokenUsage::new(
            read_count(usage, "prompt_tokens"),
            read_count(usage, "completion_tokens"),
        );

        Ok(self.response(content, usage, request_start.elapsed()))
    }

    /// Anthropic messages request
    async fn anthropic_request(&self, prompt: &str) -> Result<ModelResponse, ApiFailure> {
        let api_key = self.api_key()?;
        let request_start = Instant::now();

        let request_body = serde_json::json!({
            "model": self.provider.model,
            "max_tokens": self.request_config.max_tokens,
            "temperature": self.request_config.temperature,
            "messages": [
                {
                    "role": "user",
                    "content": prompt
                }
            ]
        });

        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_failure)?;

        let response_json = self.read_json(response).await?;

        let content = response_json
            .get("content")
            .and_then(|content| content.get(0))
            .and_then(|item| item.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| ApiFailure::InvalidRequest("No content in response".to_string()))?;

        let usage = response_json.get("usage");
        let usage = TokenUsage::new(
            read_count(usage, "input_tokens"),
            read_count(usage, "output_tokens"),
        );

        Ok(self.response(content, usage, request_start.elapsed()))
    }

    /// Gemini generateContent request
    async fn gemini_request(&self, prompt: &str) -> Result<ModelResponse, ApiFailure> {
        let api_key = self.api_key()?;
        let request_start = Instant::now();

        let request_body = serde_json::json!({
            "contents": [
                {
                    "parts": [
                        {
                            "text": prompt
                        }
                    ]
                }
            ],
            "generationConfig": {
                "maxOutputTokens": self.request_config.max_tokens,
                "temperature": self.request_config.temperature
            }
        });

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.provider.model
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(transport_failure)?;

        let response_json = self.read_json(response).await?;

        // A candidate may be split across several parts
        let content = response_json
            .get("candidates")
            .and_then(|candidates| candidates.get(0))
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|part| part.get("text").and_then(|text| text.as_str()))
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .ok_or_else(|| ApiFailure::InvalidRequest("No content in response".to_string()))?;

        // Gemini doesn't always provide token counts in the response
        let usage = response_json.get("usageMetadata");
        let usage = TokenUsage::new(
            read_count(usage, "promptTokenCount"),
            read_count(usage, "candidatesTokenCount"),
        );

        Ok(self.response(&content, usage, request_start.elapsed()))
    }

    /// Offline placeholder text sized by the configured token budget
    fn random_response(&self, prompt: &str) -> ModelResponse {
        let request_start = Instant::now();
        let mut rng = rand::thread_rng();

        let upper = (self.request_config.max_tokens as usize).clamp(1, 80);
        let lower = upper.min(20);
        let word_count = rng.gen_range(lower..=upper);

        let words: Vec<&str> = (0..word_count)
            .filter_map(|_| RANDOM_WORDS.choose(&mut rng).copied())
            .collect();

        let usage = TokenUsage::new(
            prompt.split_whitespace().count() as u64,
            words.len() as u64,
        );

        self.response(&words.join(" "), usage, request_start.elapsed())
    }

    async fn read_json(&self, response: reqwest::Response) -> Result<serde_json::Value, ApiFailure> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(failure_for_status(status.as_u16(), &body, &self.provider.model));
        }

        response
            .json()
            .await
            .map_err(|e| ApiFailure::InvalidRequest(format!("Failed to parse response: {e}")))
    }

    fn response(&self, content: &str, usage: TokenUsage, response_time: Duration) -> ModelResponse {
        ModelResponse {
            content: content.to_string(),
            usage,
            model_used: self.provider.model.clone(),
            response_time,
        }
    }
}

#[async_trait]
impl ModelClient for RealModelClient {
    async fn generate(&self, prompt: &str) -> Result<ModelResponse, ApiFailure> {
        debug!(
            provider = %self.provider.provider,
            model = %self.provider.model,
            prompt_chars = prompt.len(),
            "Sending model request"
        );

        let result = match self.provider.provider {
            ProviderId::OpenAI => self.openai_request(prompt).await,
            ProviderId::Anthropic => self.anthropic_request(prompt).await,
            ProviderId::Gemini => self.gemini_request(prompt).await,
            ProviderId::Random => Ok(self.random_response(prompt)),
        };

        match &result {
            Ok(response) => debug!(
                provider = %self.provider.provider,
                elapsed_ms = response.response_time.as_millis() as u64,
                tokens = response.usage.total(),
                "Model request completed"
            ),
            Err(failure) => warn!(
                provider = %self.provider.provider,
                failure = %failure,
                "Model request failed"
            ),
        }

        result
    }
}

fn default_base_url(provider: ProviderId) -> &'static str {
    match provider {
        ProviderId::OpenAI => OPENAI_BASE_URL,
        ProviderId::Anthropic => ANTHROPIC_BASE_URL,
        ProviderId::Gemini => GEMINI_BASE_URL,
        ProviderId::Random => "",
    }
}

fn read_count(usage: Option<&serde_json::Value>, field: &str) -> u64 {
    usage
        .and_then(|u| u.get(field))
        .and_then(|t| t.as_u64())
        .unwrap_or(0)
}

fn transport_failure(error: reqwest::Error) -> ApiFailure {
    if error.is_timeout() {
        ApiFailure::Timeout
    } else {
        ApiFailure::NetworkError(error.to_string())
    }
}

/// Map a non-success HTTP status to a failure reason
pub(crate) fn failure_for_status(status: u16, body: &str, model: &str) -> ApiFailure {
    match status {
        401 | 403 => ApiFailure::AuthenticationFailed,
        // Gemini reports a bad key as 400
        400 if body.contains("API_KEY_INVALID") => ApiFailure::AuthenticationFailed,
        400 => ApiFailure::InvalidRequest(truncate(body, 200)),
        404 => ApiFailure::ModelUnavailable(model.to_string()),
        429 => ApiFailure::RateLimitExceeded,
        503 => ApiFailure::ServiceUnavailable,
        _ => ApiFailure::ServerError(format!("HTTP {status}")),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

//! LLM Provider Abstraction
//!
//! Defines the LlmProvider trait for plain-text completion.
//! All providers return `LlmResponse` with the generated text and whatever
//! token usage the backend reports.
//!
//! ## Modules
//!
//! - `ollama`: local Ollama server (`/api/generate`)
//! - `openai`: OpenAI-compatible chat completions
//! - `claude`: Anthropic-compatible messages API

mod claude;
mod ollama;
mod openai;

#[cfg(test)]
pub(crate) mod stub;

pub use claude::ClaudeProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::BackendKind;
use crate::constants::network;
use crate::types::{Result, YearError};

// =============================================================================
// LLM Response with Usage Metrics
// =============================================================================

/// Complete LLM response including content and usage metrics
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Generated text
    pub content: String,
    /// Token usage metrics
    pub usage: TokenUsage,
    /// Response timing
    pub timing: ResponseTiming,
}

impl LlmResponse {
    /// Create response with content only (usage unknown)
    pub fn content_only(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            usage: TokenUsage::default(),
            timing: ResponseTiming::default(),
        }
    }

    pub fn with_metrics(content: String, usage: TokenUsage, timing: ResponseTiming) -> Self {
        Self {
            content,
            usage,
            timing,
        }
    }
}

/// Token usage metrics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Input tokens (prompt)
    pub input_tokens: u32,
    /// Output tokens (response)
    pub output_tokens: u32,
}

impl TokenUsage {
    /// Total tokens used (input + output)
    pub fn total(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    /// Create from OpenAI-style usage response
    pub fn from_openai(prompt_tokens: u32, completion_tokens: u32) -> Self {
        Self {
            input_tokens: prompt_tokens,
            output_tokens: completion_tokens,
        }
    }

    /// Create from Ollama-style usage response
    pub fn from_ollama(prompt_eval_count: u32, eval_count: u32) -> Self {
        Self {
            input_tokens: prompt_eval_count,
            output_tokens: eval_count,
        }
    }
}

/// Response timing metrics
#[derive(Debug, Clone, Default)]
pub struct ResponseTiming {
    /// Total response time in milliseconds (wall clock)
    pub total_ms: u64,
}

impl ResponseTiming {
    pub fn from_duration(duration: Duration) -> Self {
        Self {
            total_ms: duration.as_millis() as u64,
        }
    }
}

/// Shared LLM provider type
pub type SharedProvider = Arc<dyn LlmProvider + Send + Sync>;

// =============================================================================
// Provider Configuration
// =============================================================================

/// Configuration for LLM providers
///
/// API keys are redacted in debug output. Each provider converts the key to
/// SecretString internally.
#[derive(Clone)]
pub struct ProviderConfig {
    pub backend: BackendKind,
    /// Model name (backend-specific), already resolved
    pub model: String,
    pub api_key: Option<String>,
    /// API base URL; the backend default when absent
    pub base_url: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Maximum tokens to generate (sent where the backend requires it)
    pub max_tokens: usize,
}

impl ProviderConfig {
    pub fn new(backend: BackendKind, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            api_key: None,
            base_url: None,
            timeout_secs: network::DEFAULT_TIMEOUT_SECS,
            max_tokens: network::DEFAULT_MAX_TOKENS,
        }
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(|e| YearError::LlmApi(format!("Failed to create HTTP client: {}", e)))
    }

    /// Base URL with any trailing slash removed
    fn base_url_or(&self, default: &str) -> String {
        self.base_url
            .as_deref()
            .unwrap_or(default)
            .trim_end_matches('/')
            .to_string()
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("backend", &self.backend)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

// =============================================================================
// LLM Provider Trait
// =============================================================================

/// LLM Provider trait for single-shot text completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the prompt and return the generated text
    async fn complete(&self, prompt: &str) -> Result<LlmResponse>;

    /// Provider name for logging and error messages
    fn name(&self) -> &str;

    /// Model name currently in use
    fn model(&self) -> &str;

    /// Check that the backend can serve the configured model
    async fn health_check(&self) -> Result<bool> {
        Ok(true)
    }
}

/// Create a shared provider from configuration
pub fn create_provider(config: &ProviderConfig) -> Result<SharedProvider> {
    match config.backend {
        BackendKind::Ollama => Ok(Arc::new(OllamaProvider::new(config)?)),
        BackendKind::OpenAi => Ok(Arc::new(OpenAiProvider::new(config)?)),
        BackendKind::Claude => Ok(Arc::new(ClaudeProvider::new(config)?)),
    }
}

/// Read a non-2xx response into an API error
async fn status_error(provider: &str, response: reqwest::Response) -> YearError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    YearError::LlmApi(format!("{} API error ({}): {}", provider, status, body))
}

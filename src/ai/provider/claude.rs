//! Anthropic Messages API Provider
//!
//! The prompt travels in the `system` field; a fixed user turn asks the model
//! to start writing.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info};

use super::{
    LlmProvider, LlmResponse, ProviderConfig, ResponseTiming, TokenUsage,
    status_error,
};
use crate::constants::backend;
use crate::types::{Result, YearError};

pub struct ClaudeProvider {
    api_key: SecretString,
    api_base: String,
    model: String,
    max_tokens: usize,
    client: reqwest::Client,
}

impl std::fmt::Debug for ClaudeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClaudeProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ClaudeProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            YearError::Config(format!(
                "Anthropic API key not found. Set {} or pass --api-key",
                backend::ANTHROPIC_API_KEY_ENV
            ))
        })?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base: config.base_url_or(backend::CLAUDE_API_BASE),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            client: config.http_client()?,
        })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system: prompt,
            messages: vec![Message {
                role: "user",
                content: backend::CLAUDE_TRIGGER_MESSAGE,
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for ClaudeProvider {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        info!(
            "Generating with Claude (model: {}, max_tokens: {})",
            self.model, self.max_tokens
        );

        let start_time = Instant::now();
        let request = self.build_request(prompt);
        let url = format!("{}/v1/messages", self.api_base);

        debug!("Sending request to Anthropic API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", backend::ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| YearError::LlmApi(format!("Anthropic request failed: {}", e)))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            return Err(status_error("Anthropic", response).await);
        }

        let response_body: MessagesResponse = response.json().await.map_err(|e| {
            YearError::LlmApi(format!("Failed to parse Anthropic response: {}", e))
        })?;

        let usage = response_body
            .usage
            .map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            })
            .unwrap_or_default();

        let content = response_body
            .content
            .into_iter()
            .next()
            .and_then(|block| block.text)
            .ok_or_else(|| YearError::LlmApi("No text in Anthropic response".to_string()))?;

        Ok(LlmResponse::with_metrics(
            content,
            usage,
            ResponseTiming::from_duration(elapsed),
        ))
    }

    fn name(&self) -> &str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: usize,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    input_tokens: u32,
    output_tokens: u32,
}

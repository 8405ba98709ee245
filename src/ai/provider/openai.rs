//! OpenAI API Provider
//!
//! LLM provider using OpenAI's Chat Completions API. The whole prompt is sent
//! as a single system message.

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

/// OpenAI API Provider with secure API key handling
pub struct OpenAiProvider {
    /// API key stored securely - never exposed in logs or debug output
    api_key: SecretString,
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAiProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiProvider")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_key = config.api_key.clone().ok_or_else(|| {
            YearError::Config(format!(
                "OpenAI API key not found. Set {} or pass --api-key",
                backend::OPENAI_API_KEY_ENV
            ))
        })?;

        Ok(Self {
            api_key: SecretString::from(api_key),
            api_base: config.base_url_or(backend::OPENAI_API_BASE),
            model: config.model.clone(),
            client: config.http_client()?,
        })
    }

    fn build_request<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "system",
                content: prompt,
            }],
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        info!("Generating with OpenAI (model: {})", self.model);

        let start_time = Instant::now();
        let request = self.build_request(prompt);
        let url = format!("{}/chat/completions", self.api_base);

        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| YearError::LlmApi(format!("OpenAI request failed: {}", e)))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            return Err(status_error("OpenAI", response).await);
        }

        let response_body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| YearError::LlmApi(format!("Failed to parse OpenAI response: {}", e)))?;

        let usage = response_body
            .usage
            .map(|u| TokenUsage::from_openai(u.prompt_tokens, u.completion_tokens))
            .unwrap_or_default();

        let content = response_body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| YearError::LlmApi("No content in OpenAI response".to_string()))?;

        Ok(LlmResponse::with_metrics(
            content,
            usage,
            ResponseTiming::from_duration(elapsed),
        ))
    }

    fn name(&self) -> &str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<UsageInfo>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UsageInfo {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::stub::StubServer;
    use crate::config::BackendKind;
    use serde_json::json;

    fn provider(base_url: &str) -> OpenAiProvider {
        let mut config = ProviderConfig::new(BackendKind::OpenAi, backend::OPENAI_DEFAULT_MODEL);
        config.api_key = Some("sk-test".into());
        config.base_url = Some(base_url.to_string());
        OpenAiProvider::new(&config).unwrap()
    }

    #[test]
    fn test_debug_hides_key() {
        let debug = format!("{:?}", provider("http://localhost:1"));
        assert!(!debug.contains("sk-test"));
    }

    #[tokio::test]
    async fn test_complete_sends_single_system_message() {
        let server = StubServer::start(vec![(
            "/chat/completions",
            200,
            json!({
                "choices": [{"message": {"role": "assistant", "content": "Trophy time"}}],
                "usage": {"prompt_tokens": 30, "completion_tokens": 5}
            }),
        )])
        .await;

        let response = provider(&server.base_url).complete("the prompt").await.unwrap();
        assert_eq!(response.content, "Trophy time");
        assert_eq!(response.usage, TokenUsage::from_openai(30, 5));

        let request = &server.requests()[0];
        assert_eq!(request.header("authorization"), Some("Bearer sk-test"));
        assert_eq!(
            request.json(),
            json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "system", "content": "the prompt"}]
            })
        );
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let server =
            StubServer::start(vec![("/chat/completions", 200, json!({"choices": []}))]).await;
        let err = provider(&server.base_url).complete("x").await.unwrap_err();
        assert!(err.to_string().contains("No content"));
    }

    #[tokio::test]
    async fn test_unauthorized_is_error() {
        let server = StubServer::start(vec![(
            "/chat/completions",
            401,
            json!({"error": {"message": "Incorrect API key"}}),
        )])
        .await;
        let err = provider(&server.base_url).complete("x").await.unwrap_err();
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Incorrect API key"));
    }
}

//! Ollama Local LLM Provider
//!
//! LLM provider for locally-running Ollama models.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{
    LlmProvider, LlmResponse, ProviderConfig, ResponseTiming, TokenUsage,
    status_error,
};
use crate::constants::backend;
use crate::types::{Result, YearError};

/// Ollama Local LLM Provider
pub struct OllamaProvider {
    api_base: String,
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let api_base = config
            .base_url
            .as_deref()
            .unwrap_or(backend::OLLAMA_API_BASE);

        // Validate endpoint URL for security (SSRF prevention)
        let api_base = Self::validate_endpoint(api_base)?;

        if config.model.trim().is_empty() {
            return Err(YearError::Config(
                "Must provide Ollama model (--model)".to_string(),
            ));
        }

        Ok(Self {
            api_base,
            model: config.model.clone(),
            client: config.http_client()?,
        })
    }

    /// Validate endpoint URL for security (SSRF prevention)
    ///
    /// Only allows http/https schemes and warns for non-localhost endpoints.
    fn validate_endpoint(endpoint: &str) -> Result<String> {
        let url = url::Url::parse(endpoint).map_err(|e| {
            YearError::Config(format!("Invalid Ollama endpoint URL '{}': {}", endpoint, e))
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(YearError::Config(format!(
                "Ollama endpoint must use http or https scheme, got: {}",
                url.scheme()
            )));
        }

        if let Some(host) = url.host_str()
            && !matches!(host, "localhost" | "127.0.0.1" | "::1" | "[::1]")
        {
            warn!(
                "Ollama endpoint is not localhost: {}. Ensure this is intentional.",
                host
            );
        }

        let mut result = url.to_string();
        if result.ends_with('/') {
            result.pop();
        }
        Ok(result)
    }

    fn connect_error(&self, e: reqwest::Error) -> YearError {
        if e.is_connect() {
            YearError::LlmApi(format!(
                "Failed to connect to Ollama at {}. Is Ollama running? Start with: ollama serve",
                self.api_base
            ))
        } else {
            YearError::LlmApi(format!("Ollama request failed: {}", e))
        }
    }

    /// A bare model name also matches its `:latest` tag
    fn is_listed(&self, tags: &OllamaTagsResponse) -> bool {
        let latest = format!("{}:latest", self.model);
        tags.models
            .iter()
            .any(|m| m.name == self.model || m.name == latest)
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
        info!("Generating with Ollama (model: {})", self.model);

        let start_time = Instant::now();
        let request = OllamaRequest {
            model: &self.model,
            prompt,
            stream: false,
        };
        let url = format!("{}/api/generate", self.api_base);

        debug!("Sending request to Ollama API");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        let elapsed = start_time.elapsed();

        if !response.status().is_success() {
            return Err(status_error("Ollama", response).await);
        }

        let response_body: OllamaResponse = response
            .json()
            .await
            .map_err(|e| YearError::LlmApi(format!("Failed to parse Ollama response: {}", e)))?;

        let usage = TokenUsage::from_ollama(
            response_body.prompt_eval_count.unwrap_or(0),
            response_body.eval_count.unwrap_or(0),
        );

        Ok(LlmResponse::with_metrics(
            response_body.response,
            usage,
            ResponseTiming::from_duration(elapsed),
        ))
    }

    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    /// `Ok(false)` when the server answers but does not list the model
    async fn health_check(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.api_base);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        if !response.status().is_success() {
            return Err(status_error("Ollama", response).await);
        }

        match response.json::<OllamaTagsResponse>().await {
            Ok(tags) if self.is_listed(&tags) => {
                info!("Ollama is available with model: {}", self.model);
                Ok(true)
            }
            Ok(_) => {
                warn!(
                    "Ollama is running but model '{}' not found. Pull with: ollama pull {}",
                    self.model, self.model
                );
                Ok(false)
            }
            Err(e) => {
                debug!("Unreadable Ollama tag list, skipping model check: {}", e);
                Ok(true)
            }
        }
    }
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: String,
    #[serde(default)]
    prompt_eval_count: Option<u32>,
    #[serde(default)]
    eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::stub::StubServer;
    use crate::config::BackendKind;
    use serde_json::json;

    fn provider(base_url: &str, model: &str) -> OllamaProvider {
        let mut config = ProviderConfig::new(BackendKind::Ollama, model);
        config.base_url = Some(base_url.to_string());
        OllamaProvider::new(&config).unwrap()
    }

    #[test]
    fn test_default_endpoint() {
        let provider = OllamaProvider::new(&ProviderConfig::new(BackendKind::Ollama, "llama3")).unwrap();
        assert_eq!(provider.api_base, "http://localhost:11434");
        assert_eq!(provider.model, "llama3");
    }

    #[test]
    fn test_rejects_non_http_endpoint() {
        let mut config = ProviderConfig::new(BackendKind::Ollama, "llama3");
        config.base_url = Some("file:///etc/passwd".into());
        assert!(OllamaProvider::new(&config).err().unwrap().is_config());
    }

    #[test]
    fn test_requires_model() {
        let err = OllamaProvider::new(&ProviderConfig::new(BackendKind::Ollama, " "))
            .err()
            .unwrap();
        assert!(err.to_string().contains("Ollama model"));
    }

    #[tokio::test]
    async fn test_complete_sends_generate_request() {
        let server = StubServer::start(vec![(
            "/api/generate",
            200,
            json!({"response": "# What a year", "prompt_eval_count": 12, "eval_count": 4}),
        )])
        .await;

        let response = provider(&server.base_url, "llama3")
            .complete("Summarize this")
            .await
            .unwrap();
        assert_eq!(response.content, "# What a year");
        assert_eq!(response.usage.total(), 16);

        let requests = server.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "POST");
        assert_eq!(
            requests[0].json(),
            json!({"model": "llama3", "prompt": "Summarize this", "stream": false})
        );
    }

    #[tokio::test]
    async fn test_complete_reports_status_and_body() {
        let server = StubServer::start(vec![(
            "/api/generate",
            500,
            json!({"error": "model exploded"}),
        )])
        .await;

        let err = provider(&server.base_url, "llama3")
            .complete("x")
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("model exploded"));
    }

    #[tokio::test]
    async fn test_missing_response_field_is_error() {
        let server = StubServer::start(vec![("/api/generate", 200, json!({"done": true}))]).await;
        let err = provider(&server.base_url, "llama3")
            .complete("x")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse Ollama response"));
    }

    #[tokio::test]
    async fn test_health_check_matches_latest_tag() {
        let server = StubServer::start(vec![(
            "/api/tags",
            200,
            json!({"models": [{"name": "llama3:latest"}, {"name": "qwen2:7b"}]}),
        )])
        .await;

        assert!(provider(&server.base_url, "llama3").health_check().await.unwrap());
        assert!(provider(&server.base_url, "qwen2:7b").health_check().await.unwrap());
        assert!(!provider(&server.base_url, "qwen2").health_check().await.unwrap());
        assert!(!provider(&server.base_url, "llama").health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_unreachable_server_is_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let err = provider(&base_url, "llama3").health_check().await.unwrap_err();
        assert!(err.to_string().contains("Is Ollama running"));
    }
}

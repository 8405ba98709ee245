//! Summary generation.
//!
//! One preflight check, one completion call. Every failure leaves this module
//! as `YearError::Backend` naming the backend.

use tracing::{debug, info};

use super::provider::{LlmProvider, LlmResponse};
use crate::types::{Result, YearError};

/// Verify the backend can serve the configured model
pub async fn preflight(provider: &dyn LlmProvider) -> Result<()> {
    debug!("Checking {} availability", provider.name());
    let available = provider
        .health_check()
        .await
        .map_err(|e| YearError::backend(provider.name(), e))?;

    if !available {
        return Err(YearError::backend(
            provider.name(),
            YearError::LlmApi(format!(
                "model '{}' is not available. Pull it with: ollama pull {}",
                provider.model(),
                provider.model()
            )),
        ));
    }
    Ok(())
}

/// Run the preflight check and send the prompt, returning the generated text
pub async fn generate_summary(provider: &dyn LlmProvider, prompt: &str) -> Result<LlmResponse> {
    preflight(provider).await?;

    let response = provider
        .complete(prompt)
        .await
        .map_err(|e| YearError::backend(provider.name(), e))?;

    info!(
        "{} ({}) answered in {}ms, {} tokens ({} input + {} output)",
        provider.name(),
        provider.model(),
        response.timing.total_ms,
        response.usage.total(),
        response.usage.input_tokens,
        response.usage.output_tokens
    );
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FakeProvider {
        healthy: bool,
        reply: std::result::Result<&'static str, &'static str>,
        prompts: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(healthy: bool, reply: std::result::Result<&'static str, &'static str>) -> Self {
            Self {
                healthy,
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl LlmProvider for FakeProvider {
        async fn complete(&self, prompt: &str) -> Result<LlmResponse> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match self.reply {
                Ok(text) => Ok(LlmResponse::content_only(text)),
                Err(msg) => Err(YearError::LlmApi(msg.to_string())),
            }
        }

        fn name(&self) -> &str {
            "ollama"
        }

        fn model(&self) -> &str {
            "llama3"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(self.healthy)
        }
    }

    #[tokio::test]
    async fn test_generate_returns_text() {
        let provider = FakeProvider::new(true, Ok("## Recap"));
        let response = generate_summary(&provider, "prompt body").await.unwrap();
        assert_eq!(response.content, "## Recap");
        assert_eq!(*provider.prompts.lock().unwrap(), vec!["prompt body"]);
    }

    #[tokio::test]
    async fn test_failure_is_wrapped_with_backend_name() {
        let provider = FakeProvider::new(true, Err("connection reset"));
        let err = generate_summary(&provider, "p").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "AI service [ollama] call failed: connection reset"
        );
    }

    #[tokio::test]
    async fn test_missing_model_stops_before_completion() {
        let provider = FakeProvider::new(false, Ok("unused"));
        let err = generate_summary(&provider, "p").await.unwrap_err();
        assert!(err.to_string().contains("ollama pull llama3"));
        assert!(provider.prompts.lock().unwrap().is_empty());
    }
}

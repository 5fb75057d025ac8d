use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::PlanixError;
use super::provider::LLMProvider;
use super::types::LLMResponse;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// OpenAI chat completions, or any endpoint speaking the same protocol.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAIProvider {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, PlanixError> {
        Self::with_base_url(api_key, model, timeout, "https://api.openai.com/v1")
    }

    pub fn with_base_url(api_key: &str, model: &str, timeout: Duration, base_url: &str) -> Result<Self, PlanixError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PlanixError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, PlanixError> {
        let mut messages = Vec::new();
        if let Some(sys) = system {
            messages.push(json!({"role": "system", "content": sys}));
        }
        messages.push(json!({"role": "user", "content": prompt}));

        let body = json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": 4096,
        });

        let resp = self.client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(PlanixError::RateLimit("OpenAI rate limit".into()));
        }
        if status.as_u16() == 401 {
            return Err(PlanixError::Authentication("Invalid OpenAI API key".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| PlanixError::LLMApi(format!("Failed to parse OpenAI response: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(PlanixError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["choices"][0]["message"]["content"].as_str()
            .ok_or_else(|| PlanixError::LLMApi("No content in OpenAI response".into()))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["usage"]["prompt_tokens"].as_u64(),
            output_tokens: data["usage"]["completion_tokens"].as_u64(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "openai" }
    fn model_name(&self) -> &str { &self.model }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn test_complete_sends_system_and_user_messages() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer sk-test")
                .body_contains("be brief");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "choices": [{"message": {"role": "assistant", "content": "EXECUTIVE SUMMARY\nok"}}],
                    "usage": {"prompt_tokens": 20, "completion_tokens": 4}
                }));
        });

        let provider = OpenAIProvider::with_base_url(
            "sk-test", "gpt-test", Duration::from_secs(5), &server.base_url(),
        ).unwrap();
        let response = provider.complete("analyze", Some("be brief")).await.unwrap();
        assert!(response.content.starts_with("EXECUTIVE SUMMARY"));
        assert_eq!(response.output_tokens, Some(4));
        mock.assert();
    }

    #[tokio::test]
    #[ignore = "requires loopback networking"]
    async fn test_unauthorized_is_authentication_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(401).json_body(json!({"error": {"message": "bad key"}}));
        });

        let provider = OpenAIProvider::with_base_url(
            "sk-bad", "gpt-test", Duration::from_secs(5), &server.base_url(),
        ).unwrap();
        let err = provider.complete("analyze", None).await.unwrap_err();
        assert!(matches!(err, PlanixError::Authentication(_)));
    }
}

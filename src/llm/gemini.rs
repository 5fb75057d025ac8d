use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use crate::errors::PlanixError;
use super::provider::LLMProvider;
use super::types::LLMResponse;
use tracing::{debug, info, warn};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Models tried in order when none is configured.
pub const PREFERRED_MODELS: [&str; 4] = [
    "gemini-2.5-flash",
    "gemini-flash-latest",
    "gemini-2.5-pro",
    "gemini-pro-latest",
];

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

fn build_client(timeout: Duration) -> Result<Client, PlanixError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| PlanixError::Config(format!("Failed to build HTTP client: {}", e)))
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: &str, timeout: Duration) -> Result<Self, PlanixError> {
        Self::with_base_url(api_key, model, timeout, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, model: &str, timeout: Duration, base_url: &str) -> Result<Self, PlanixError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn complete(&self, prompt: &str, system: Option<&str>) -> Result<LLMResponse, PlanixError> {
        let text = match system {
            Some(sys) => format!("System: {}\n\n{}", sys, prompt),
            None => prompt.to_string(),
        };

        let body = json!({
            "contents": [{"role": "user", "parts": [{"text": text}]}],
            "generationConfig": {
                "maxOutputTokens": 8192,
            }
        });

        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        debug!(model = %self.model, "Sending Gemini request");

        let resp = self.client.post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        match resp.status().as_u16() {
            429 => return Err(PlanixError::RateLimit("Gemini rate limit".into())),
            401 | 403 => return Err(PlanixError::Authentication("Gemini rejected the API key".into())),
            _ => {}
        }

        let data: Value = resp.json().await
            .map_err(|e| PlanixError::LLMApi(format!("Parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(PlanixError::LLMApi(error["message"].as_str().unwrap_or("Unknown").to_string()));
        }

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| PlanixError::LLMApi("No text response from model".into()))?
            .to_string();

        Ok(LLMResponse {
            content,
            input_tokens: data["usageMetadata"]["promptTokenCount"].as_u64(),
            output_tokens: data["usageMetadata"]["candidatesTokenCount"].as_u64(),
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}

/// Pick the first preferred model that is available, else the first
/// available model at all.
pub fn select_model(available: &[String]) -> Option<String> {
    PREFERRED_MODELS
        .iter()
        .find(|preferred| available.iter().any(|m| m == *preferred))
        .map(|m| m.to_string())
        .or_else(|| available.first().cloned())
}

/// Names (without the `models/` prefix) of models supporting `generateContent`.
pub fn generate_content_models(listing: &Value) -> Vec<String> {
    listing["models"]
        .as_array()
        .map(|models| {
            models.iter()
                .filter(|m| {
                    m["supportedGenerationMethods"]
                        .as_array()
                        .is_some_and(|methods| methods.iter().any(|x| x == "generateContent"))
                })
                .filter_map(|m| m["name"].as_str())
                .map(|name| name.trim_start_matches("models/").to_string())
                .collect()
        })
        .unwrap_or_default()
}

/// List the account's models once and choose one to use for this process.
pub async fn resolve_model(api_key: &str, timeout: Duration) -> Result<String, PlanixError> {
    let client = build_client(timeout)?;
    let resp = client.get(format!("{}/models", DEFAULT_BASE_URL))
        .header("x-goog-api-key", api_key)
        .send()
        .await?;

    if matches!(resp.status().as_u16(), 401 | 403) {
        return Err(PlanixError::Authentication("Gemini rejected the API key".into()));
    }

    let listing: Value = resp.json().await
        .map_err(|e| PlanixError::LLMApi(format!("Could not list models from Gemini: {}", e)))?;
    let available = generate_content_models(&listing);

    match select_model(&available) {
        Some(model) => {
            info!(model = %model, candidates = available.len(), "Resolved Gemini model");
            Ok(model)
        }
        None => {
            warn!("No Gemini models support generateContent");
            Err(PlanixError::LLMApi("No models available that support 'generateContent'".into()))
        }
    }
}

use std::sync::Arc;
use crate::config::LLMConfig;
use crate::config::credentials::mask_secret;
use crate::errors::PlanixError;
use super::provider::LLMProvider;
use super::demo::DemoProvider;
use super::gemini::{self, GeminiProvider};
use super::openai::{self, OpenAIProvider};
use tracing::{info, warn};

/// Build a provider from fully resolved settings. `model` must already be
/// decided; see [`resolve_provider`] for startup-time model discovery.
pub fn create_provider(config: &LLMConfig, model: Option<&str>) -> Result<Arc<dyn LLMProvider>, PlanixError> {
    let provider = config.provider();
    if provider == "demo" {
        return Ok(Arc::new(DemoProvider));
    }

    let api_key = config.resolved_api_key();
    if api_key.is_empty() {
        let hint = config.default_key_var()
            .map(|v| format!(" (set llm.api_key or {})", v))
            .unwrap_or_default();
        return Err(PlanixError::Config(format!("No {} API key configured{}", provider, hint)));
    }

    let timeout = config.timeout();
    match provider {
        "gemini" => {
            let model = model.unwrap_or(gemini::DEFAULT_MODEL);
            let p = match config.base_url.as_deref() {
                Some(url) => GeminiProvider::with_base_url(&api_key, model, timeout, url)?,
                None => GeminiProvider::new(&api_key, model, timeout)?,
            };
            Ok(Arc::new(p))
        }
        "openai" => {
            let model = model.unwrap_or(openai::DEFAULT_MODEL);
            let p = match config.base_url.as_deref() {
                Some(url) => OpenAIProvider::with_base_url(&api_key, model, timeout, url)?,
                None => OpenAIProvider::new(&api_key, model, timeout)?,
            };
            Ok(Arc::new(p))
        }
        other => Err(PlanixError::Config(format!("Unknown LLM provider: {}", other))),
    }
}

/// Decide the model once and build the provider. When Gemini has no model
/// configured, the account's model list is consulted; failures fall back
/// to the default model.
pub async fn resolve_provider(config: &LLMConfig) -> Result<Arc<dyn LLMProvider>, PlanixError> {
    let mut model = config.model.clone();

    if model.is_none() && config.provider() == "gemini" && config.base_url.is_none() {
        let api_key = config.resolved_api_key();
        if !api_key.is_empty() {
            match gemini::resolve_model(&api_key, config.timeout()).await {
                Ok(m) => model = Some(m),
                Err(e) => warn!(error = %e, fallback = gemini::DEFAULT_MODEL, "Gemini model discovery failed"),
            }
        }
    }

    let provider = create_provider(config, model.as_deref())?;
    info!(
        provider = provider.provider_name(),
        model = provider.model_name(),
        key = %mask_secret(&config.resolved_api_key()),
        "LLM provider ready"
    );
    Ok(provider)
}

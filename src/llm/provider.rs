use async_trait::async_trait;
use crate::errors::{with_retry, PlanixError, RetryConfig};
use crate::analysis::parser::is_failure_sentinel;
use super::types::LLMResponse;

#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Free-form text completion
    async fn complete(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<LLMResponse, PlanixError>;

    /// Provider name for logging
    fn provider_name(&self) -> &str;

    /// Model identifier
    fn model_name(&self) -> &str;
}

/// Run one completion with retries and return its text.
///
/// Empty output and text carrying a failure sentinel (`ERROR:`,
/// `API Error:`, `AI Error:`) are reported as `LLMApi` errors.
pub async fn generate_text(
    llm: &dyn LLMProvider,
    prompt: &str,
    system: Option<&str>,
    retry: &RetryConfig,
) -> Result<String, PlanixError> {
    let operation = format!("{}:complete", llm.provider_name());
    let response = with_retry(&operation, retry, || llm.complete(prompt, system)).await?;

    let text = response.content;
    if text.trim().is_empty() {
        return Err(PlanixError::LLMApi(format!("{} returned an empty response", llm.provider_name())));
    }
    if is_failure_sentinel(&text) {
        return Err(PlanixError::LLMApi(text.trim().to_string()));
    }
    Ok(text)
}

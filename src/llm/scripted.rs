use std::collections::VecDeque;
use std::sync::Mutex;
use async_trait::async_trait;
use crate::errors::PlanixError;
use super::provider::LLMProvider;
use super::types::LLMResponse;

/// Provider that replays a fixed queue of responses and records every
/// prompt it receives. Once the queue is drained each call fails.
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<Result<String, PlanixError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(responses: Vec<Result<String, PlanixError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Queue another response.
    pub fn push(&self, response: Result<String, PlanixError>) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, prompt: &str, _system: Option<&str>) -> Result<LLMResponse, PlanixError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }
        let next = self.responses.lock()
            .map_err(|_| PlanixError::Internal("scripted provider lock poisoned".into()))?
            .pop_front();
        match next {
            Some(Ok(content)) => Ok(LLMResponse::text(content, "scripted")),
            Some(Err(e)) => Err(e),
            None => Err(PlanixError::LLMApi("no scripted response left".into())),
        }
    }

    fn provider_name(&self) -> &str { "scripted" }
    fn model_name(&self) -> &str { "scripted" }
}

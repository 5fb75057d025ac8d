pub mod commands;
pub mod serve;
pub mod user;
pub mod analyze;

pub use commands::{Cli, Commands};

use std::path::Path;
use crate::config::{self, LLMConfig, PlanixConfig};
use crate::errors::PlanixError;
use commands::LlmArgs;

/// Load the config file if one was given, otherwise defaults.
pub async fn load_config(path: Option<&str>) -> Result<PlanixConfig, PlanixError> {
    match path {
        Some(p) => config::parse_config(Path::new(p)).await,
        None => Ok(PlanixConfig::default()),
    }
}

/// Command-line flags win over file values.
pub fn apply_llm_overrides(config: &mut PlanixConfig, args: &LlmArgs) {
    let llm = config.llm.get_or_insert_with(LLMConfig::default);
    if let Some(provider) = &args.provider {
        llm.provider = Some(provider.clone());
    }
    if let Some(model) = &args.model {
        llm.model = Some(model.clone());
    }
    if let Some(key) = &args.api_key {
        llm.api_key = Some(key.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let mut config = config::parser::parse_config_str("llm:\n  provider: openai\n  model: gpt-4o\n").unwrap();
        apply_llm_overrides(&mut config, &LlmArgs {
            provider: Some("demo".to_string()),
            ..Default::default()
        });
        assert_eq!(config.llm().provider(), "demo");
        assert_eq!(config.llm().model.as_deref(), Some("gpt-4o"));
    }

    #[tokio::test]
    async fn test_no_config_file_uses_defaults() {
        let config = load_config(None).await.unwrap();
        assert_eq!(config.port(), 8080);
    }
}

use std::path::Path;
use crate::errors::PlanixError;
use super::types::PlanixConfig;
use super::schema::CONFIG_SCHEMA;
use tracing::warn;

pub const SUPPORTED_PROVIDERS: [&str; 3] = ["gemini", "openai", "demo"];

pub async fn parse_config(path: &Path) -> Result<PlanixConfig, PlanixError> {
    if !path.exists() {
        return Err(PlanixError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(PlanixError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<PlanixConfig, PlanixError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;
    if yaml.is_null() {
        return Ok(PlanixConfig::default());
    }

    // JSON Schema validation
    validate_schema(&yaml)?;

    // Parse into typed config
    let config: PlanixConfig = serde_yaml::from_value(yaml)?;

    validate_semantics(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), PlanixError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| PlanixError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| PlanixError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory: typed parsing and semantic checks decide what is fatal
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

fn validate_semantics(config: &PlanixConfig) -> Result<(), PlanixError> {
    let Some(llm) = &config.llm else {
        return Ok(());
    };

    if !SUPPORTED_PROVIDERS.contains(&llm.provider()) {
        return Err(PlanixError::Config(format!(
            "Unknown LLM provider '{}', expected one of: {}",
            llm.provider(),
            SUPPORTED_PROVIDERS.join(", ")
        )));
    }
    if llm.timeout_secs == Some(0) {
        return Err(PlanixError::Config("llm.timeout_secs must be at least 1".into()));
    }
    if llm.max_retries() > 1 {
        return Err(PlanixError::Config("llm.max_retries may be 0 or 1".into()));
    }
    if llm.provider() == "demo" && llm.api_key.is_some() {
        warn!("llm.api_key is ignored by the demo provider");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config_str(
            "server:\n  host: 127.0.0.1\n  port: 9000\ndatabase:\n  path: /tmp/p.db\nllm:\n  provider: openai\n  model: gpt-4o\n  timeout_secs: 30\n",
        ).unwrap();
        assert_eq!(config.host(), "127.0.0.1");
        assert_eq!(config.port(), 9000);
        assert_eq!(config.db_path(), "/tmp/p.db");
        assert_eq!(config.llm().provider(), "openai");
        assert_eq!(config.llm().timeout().as_secs(), 30);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config_str("").unwrap();
        assert_eq!(config.port(), 8080);
    }

    #[test]
    fn test_unknown_provider_rejected() {
        let err = parse_config_str("llm:\n  provider: watson\n").unwrap_err();
        assert!(matches!(err, PlanixError::Config(_)));
    }

    #[test]
    fn test_retry_bound_enforced() {
        assert!(parse_config_str("llm:\n  max_retries: 3\n").is_err());
        assert!(parse_config_str("llm:\n  max_retries: 0\n").is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(parse_config_str("llm:\n  timeout_secs: 0\n").is_err());
    }

    #[test]
    fn test_type_mismatch_is_error() {
        let err = parse_config_str("server:\n  port: not-a-number\n").unwrap_err();
        assert!(matches!(err, PlanixError::Yaml(_)));
    }

    #[tokio::test]
    async fn test_parse_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "llm:\n  provider: demo").unwrap();
        let config = parse_config(file.path()).await.unwrap();
        assert_eq!(config.llm().provider(), "demo");
    }

    #[tokio::test]
    async fn test_missing_file_is_config_error() {
        let err = parse_config(Path::new("/nonexistent/planix.yaml")).await.unwrap_err();
        assert!(matches!(err, PlanixError::Config(_)));
    }
}

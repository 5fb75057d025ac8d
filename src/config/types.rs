use std::time::Duration;
use serde::{Deserialize, Serialize};
use super::credentials::resolve_credential;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DB_PATH: &str = "./data/planix.db";
pub const DEFAULT_PROVIDER: &str = "gemini";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_MAX_RETRIES: u32 = 1;

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PlanixConfig {
    pub server: Option<ServerConfig>,
    pub database: Option<DatabaseConfig>,
    pub llm: Option<LLMConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DatabaseConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct LLMConfig {
    /// gemini, openai or demo
    pub provider: Option<String>,
    pub model: Option<String>,
    /// Literal key or `$ENV_VAR` reference.
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_retries: Option<u32>,
    /// Directory with `report.txt` / `severity.txt` prompt overrides.
    pub prompts_dir: Option<String>,
}

impl PlanixConfig {
    pub fn host(&self) -> String {
        self.server.as_ref()
            .and_then(|s| s.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub fn port(&self) -> u16 {
        self.server.as_ref().and_then(|s| s.port).unwrap_or(DEFAULT_PORT)
    }

    pub fn db_path(&self) -> String {
        self.database.as_ref()
            .and_then(|d| d.path.clone())
            .unwrap_or_else(|| DEFAULT_DB_PATH.to_string())
    }

    pub fn llm(&self) -> LLMConfig {
        self.llm.clone().unwrap_or_default()
    }
}

impl LLMConfig {
    pub fn provider(&self) -> &str {
        self.provider.as_deref().unwrap_or(DEFAULT_PROVIDER)
    }

    /// Environment variable consulted when no key is configured.
    pub fn default_key_var(&self) -> Option<&'static str> {
        match self.provider() {
            "gemini" => Some("GEMINI_API_KEY"),
            "openai" => Some("OPENAI_API_KEY"),
            _ => None,
        }
    }

    /// The API key with `$VAR` references resolved. Empty when unset.
    pub fn resolved_api_key(&self) -> String {
        match &self.api_key {
            Some(key) => resolve_credential(key),
            None => self.default_key_var()
                .and_then(|var| std::env::var(var).ok())
                .unwrap_or_default(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES)
    }
}

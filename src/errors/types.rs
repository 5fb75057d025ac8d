use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanixError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("LLM API error: {0}")]
    LLMApi(String),

    #[error("Rate limited: {0}")]
    RateLimit(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<reqwest::Error> for PlanixError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            PlanixError::Timeout(e.to_string())
        } else {
            PlanixError::Network(e.to_string())
        }
    }
}

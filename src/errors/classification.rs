use super::types::PlanixError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl PlanixError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            // Retryable errors
            PlanixError::RateLimit(_) => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            PlanixError::Network(_) => ErrorClassification {
                error_type: "NetworkError",
                retryable: true,
            },
            PlanixError::Timeout(_) => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            PlanixError::LLMApi(_) => ErrorClassification {
                error_type: "LLMApiError",
                retryable: true,
            },
            PlanixError::Database(_) => ErrorClassification {
                error_type: "DatabaseError",
                retryable: true,
            },
            PlanixError::Io(_) => ErrorClassification {
                error_type: "IoError",
                retryable: true,
            },

            // Non-retryable errors
            PlanixError::Authentication(_) => ErrorClassification {
                error_type: "AuthenticationError",
                retryable: false,
            },
            PlanixError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                retryable: false,
            },
            PlanixError::Validation(_) => ErrorClassification {
                error_type: "ValidationError",
                retryable: false,
            },
            PlanixError::NotFound(_) => ErrorClassification {
                error_type: "NotFoundError",
                retryable: false,
            },
            PlanixError::Export(_) => ErrorClassification {
                error_type: "ExportError",
                retryable: false,
            },
            PlanixError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                retryable: false,
            },
            PlanixError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                retryable: false,
            },
            PlanixError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                retryable: false,
            },
        }
    }
}

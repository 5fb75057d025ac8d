use std::time::Duration;
use std::future::Future;

use super::classification::ErrorClassification;
use super::types::PlanixError;
use tracing::warn;

const MAX_RATE_LIMIT_DELAY: Duration = Duration::from_secs(30);
const MAX_BACKOFF_DELAY: Duration = Duration::from_secs(10);

impl ErrorClassification {
    /// Calculate the retry delay for this error classification based on the
    /// current attempt number (0-indexed) and the configured base delay.
    ///
    /// - RateLimitError: base * (4 + attempt), capped at 30s
    /// - Default: base * 2^attempt + random jitter in [0, base), capped at 10s
    pub fn retry_delay(&self, attempt: u32, base: Duration) -> Duration {
        match self.error_type {
            "RateLimitError" => {
                let delay = base.saturating_mul(4 + attempt);
                delay.min(MAX_RATE_LIMIT_DELAY)
            }
            _ => {
                let factor = 2u32.saturating_pow(attempt);
                let jitter = base.mul_f64(rand::random::<f64>());
                (base.saturating_mul(factor) + jitter).min(MAX_BACKOFF_DELAY)
            }
        }
    }
}

/// Retry configuration for provider calls.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 1,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryConfig {
    /// No retries at all.
    pub fn none() -> Self {
        Self { max_retries: 0, base_delay: Duration::ZERO }
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and we haven't
/// exceeded max_retries.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, PlanixError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PlanixError>>,
{
    let max_attempts = config.max_retries + 1;
    let mut attempt = 0;

    loop {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable {
                    warn!(
                        operation = operation_name,
                        error_type = classification.error_type,
                        "Non-retryable error, failing immediately"
                    );
                    return Err(e);
                }
                if attempt + 1 >= max_attempts {
                    warn!(
                        operation = operation_name,
                        attempt = attempt + 1,
                        max = max_attempts,
                        "Max retries exhausted"
                    );
                    return Err(e);
                }

                let delay = classification.retry_delay(attempt, config.base_delay);
                warn!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    error_type = classification.error_type,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

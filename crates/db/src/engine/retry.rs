//! Whole-transaction retry for retryable write conflicts.

use std::future::Future;
use std::time::Duration;

use goldbook_shared::config::EngineConfig;
use goldbook_shared::error::AppResult;
use rand::Rng;

/// Runs an operation, retrying it from scratch on retryable errors.
///
/// Each attempt must be a self-contained transaction; nothing from a failed
/// attempt survives into the next one. Backoff grows linearly with jitter.
pub(crate) async fn with_retry<T, F, Fut>(config: &EngineConfig, op: F) -> AppResult<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Err(err) if err.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let jitter = rand::rng().random_range(0..=config.retry_backoff_ms);
                let delay = config.retry_backoff_ms * u64::from(attempt) + jitter;
                tracing::warn!(attempt, delay_ms = delay, error = %err, "retrying after write conflict");
                tokio::time::sleep(Duration::from_millis(delay)).await;
            }
            other => return other,
        }
    }
}

//! Exponential backoff with jitter for transient chat/embedding errors.

use crate::error::{classify_error, ErrorClass, LlmError, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_backoff_ms: 1000,
            max_backoff_ms: 60_000,
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let delay_ms =
            (self.initial_backoff_ms as f64 * self.backoff_multiplier.powi(attempt as i32)) as u64;
        let delay_ms = delay_ms.min(self.max_backoff_ms);
        let delay_ms = if self.jitter {
            let jitter_amount = (delay_ms as f64 * 0.25 * rand::random::<f64>()) as u64;
            delay_ms + jitter_amount
        } else {
            delay_ms
        };
        Duration::from_millis(delay_ms)
    }
}

/// Run `f` up to `config.max_retries` additional times after a transient
/// failure, backing off exponentially between attempts. Permanent errors
/// abort immediately.
pub async fn retry_with_backoff<F, Fut, T>(
    config: &RetryConfig,
    operation_name: &str,
    mut f: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut last_error: Option<LlmError> = None;

    for attempt in 0..=config.max_retries {
        if attempt > 0 {
            info!(operation = operation_name, attempt, "retrying operation");
        }

        match f().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let class = classify_error(&e);
                debug!(operation = operation_name, attempt, ?class, "operation failed");

                if class == ErrorClass::Permanent {
                    return Err(e);
                }

                last_error = Some(e);

                if attempt < config.max_retries {
                    let delay = config.backoff_delay(attempt);
                    warn!(operation = operation_name, attempt, delay_ms = delay.as_millis(), "retrying after delay");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        LlmError::Transient(format!(
            "operation '{}' failed after {} retries",
            operation_name, config.max_retries
        ))
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn backoff_delay_grows_exponentially_without_jitter() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };
        assert_eq!(config.backoff_delay(0).as_millis(), 1000);
        assert_eq!(config.backoff_delay(1).as_millis(), 2000);
        assert_eq!(config.backoff_delay(2).as_millis(), 4000);
    }

    #[test]
    fn backoff_delay_is_capped() {
        let config = RetryConfig {
            jitter: false,
            max_backoff_ms: 5000,
            ..Default::default()
        };
        assert_eq!(config.backoff_delay(5).as_millis(), 5000);
    }

    #[tokio::test]
    async fn succeeds_after_transient_errors() {
        let config = RetryConfig {
            initial_backoff_ms: 1,
            jitter: false,
            ..Default::default()
        };
        let attempts = Arc::new(Mutex::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result = retry_with_backoff(&config, "test", move || {
            let attempts = Arc::clone(&attempts_clone);
            async move {
                let mut count = attempts.lock().unwrap();
                *count += 1;
                if *count < 3 {
                    Err(LlmError::Transient("unavailable".into()))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(*attempts.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn aborts_immediately_on_permanent_error() {
        let config = RetryConfig {
            initial_backoff_ms: 1,
            ..Default::default()
        };
        let attempts = Arc::new(Mutex::new(0));
        let attempts_clone = Arc::clone(&attempts);

        let result: Result<()> = retry_with_backoff(&config, "test", move || {
            let attempts = Arc::clone(&attempts_clone);
            async move {
                *attempts.lock().unwrap() += 1;
                Err(LlmError::Permanent("bad request".into()))
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(*attempts.lock().unwrap(), 1);
    }
}

use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Retry behaviour for startup-time connection attempts.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Total number of attempts before giving up (>= 1).
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after each failed attempt.
    pub initial_delay: Duration,
    /// Upper bound for the backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(10),
        }
    }
}

/// Runs `operation` until it succeeds or the attempt budget is exhausted,
/// sleeping with exponential backoff between attempts.
pub async fn retry_with_backoff<F, Fut, T, E>(
    label: &str,
    config: &RetryConfig,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delay = config.initial_delay;

    for attempt in 1..=config.max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    info!("{} succeeded on attempt {}", label, attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt < config.max_attempts => {
                warn!(
                    "{} failed on attempt {}/{}: {}. Retrying in {:?}",
                    label, attempt, config.max_attempts, e, delay
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(config.max_delay);
            }
            Err(e) => return Err(e),
        }
    }

    unreachable!("retry loop always returns within the attempt budget")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick_config(max_attempts: u32) -> RetryConfig {
        RetryConfig {
            max_attempts,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(4),
        }
    }

    #[tokio::test]
    async fn test_succeeds_first_attempt() {
        let result: Result<i32, String> =
            retry_with_backoff("op", &quick_config(3), || async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, String> = retry_with_backoff("op", &quick_config(5), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("not yet".to_string())
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_budget() {
        let calls = AtomicU32::new(0);
        let result: Result<i32, String> = retry_with_backoff("op", &quick_config(3), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("still broken".to_string()) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}

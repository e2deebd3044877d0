use crate::utils::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

/// Exponential backoff for outbound calls: `base * 2^(n-1)`, capped at `max_delay_ms`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total tries including the first one.
    pub max_attempts: u32,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
    /// Random spread applied to each delay, in percent of the delay.
    pub jitter_percent: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1_000,
            max_delay_ms: 30_000,
            jitter_percent: 0,
        }
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Delay before retry number `retry` (1-based), without jitter.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 2u64.saturating_pow(retry.saturating_sub(1));
        let delay = self.base_delay_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_delay_ms))
    }

    fn jittered(&self, retry: u32) -> Duration {
        let delay = self.backoff(retry).as_millis() as u64;
        if self.jitter_percent == 0 || delay == 0 {
            return Duration::from_millis(delay);
        }
        let spread = (delay * self.jitter_percent / 100) as i64;
        let jitter: i64 = rand::thread_rng().gen_range(-spread..=spread);
        Duration::from_millis((delay as i64 + jitter).max(0) as u64)
    }

    /// Runs `call` until it succeeds, fails with a non-retryable error, or the
    /// attempts run out. The last error is returned in the latter two cases.
    pub async fn run<T, F, Fut>(&self, operation: &str, mut call: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match call().await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt < attempts => {
                    let delay = self.jittered(attempt);
                    tracing::debug!(
                        "⏳ {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        operation,
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    if e.is_retryable() {
                        tracing::warn!("{} failed after {} attempts: {}", operation, attempt, e);
                    }
                    return Err(e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::CalcError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay_ms: 1,
            max_delay_ms: 5,
            jitter_percent: 0,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.backoff(1), Duration::from_secs(1));
        assert_eq!(policy.backoff(2), Duration::from_secs(2));
        assert_eq!(policy.backoff(3), Duration::from_secs(4));
        assert_eq!(policy.backoff(40), Duration::from_secs(30));
    }

    #[test]
    fn test_jitter_stays_within_spread() {
        let policy = RetryPolicy {
            jitter_percent: 20,
            ..RetryPolicy::default()
        };
        for _ in 0..50 {
            let delay = policy.jittered(1).as_millis();
            assert!((800..=1200).contains(&delay), "delay {} out of range", delay);
        }
    }

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = fast_policy(3)
            .run("flaky", || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(CalcError::unexpected_response("test", "not yet"))
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = fast_policy(4)
            .run("always-failing", || {
                let counter = counter.clone();
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst);
                    Err(CalcError::unexpected_response("test", format!("failure {}", n)))
                }
            })
            .await;

        assert!(result.unwrap_err().to_string().contains("failure 3"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_non_retryable_error_stops_immediately() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<()> = fast_policy(5)
            .run("bad-config", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err(CalcError::ConfigError {
                        message: "missing key".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(CalcError::ConfigError { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let _ = fast_policy(0)
            .run("once", || {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, CalcError>(())
                }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

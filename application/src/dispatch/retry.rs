//! Retry with exponential backoff and jitter.
//!
//! Delay before retry number `n` (0-based) is `base * 2^n + uniform[0, jitter)`.
//! With the defaults (3 attempts, 1.0s base, 0.35s jitter) a call that keeps
//! failing sleeps roughly 1s and then 2s before the error is surfaced.

use crate::ports::model_client::GatewayError;
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry parameters for one logical call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(1), Duration::from_millis(350))
    }
}

impl RetryPolicy {
    /// `max_attempts` counts the first try; it is clamped to at least 1.
    pub fn new(max_attempts: u32, base_delay: Duration, jitter: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
            jitter,
        }
    }

    /// Single attempt, no sleeping.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, Duration::ZERO)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Deterministic part of the delay before retry `attempt` (0-based).
    pub fn base_delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Full delay before retry `attempt`, jitter included.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let jitter = if self.jitter.is_zero() {
            Duration::ZERO
        } else {
            rand::thread_rng().gen_range(Duration::ZERO..self.jitter)
        };
        self.base_delay_for(attempt) + jitter
    }

    /// Run `operation` until it succeeds, fails permanently, or attempts run out.
    ///
    /// Non-retryable errors (see [`GatewayError::is_retryable`]) are returned
    /// immediately; after the last attempt the last error is returned.
    pub async fn run<F, Fut, T>(&self, label: &str, mut operation: F) -> Result<T, GatewayError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, GatewayError>>,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => {
                    debug!(operation = label, error = %e, "Non-retryable failure");
                    return Err(e);
                }
                Err(e) if attempt + 1 >= self.max_attempts => {
                    warn!(
                        operation = label,
                        attempts = self.max_attempts,
                        error = %e,
                        "Giving up after retries"
                    );
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        operation = label,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "Retrying after failure"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

//! Bounded exponential backoff for idempotent requests.
//!
//! Only errors where [`LetoError::is_retryable`] holds are retried: transport
//! failures and 5xx responses. A 4xx answer is final.
//!
//! Backoff with the default 100ms base: 100ms, 200ms, 400ms, 800ms…, capped
//! at [`DEFAULT_MAX_DELAY`].

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

use crate::error::LetoError;

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);

/// How many times to retry, how long to wait before the first retry, and
/// the longest single wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }

    pub fn none() -> Self {
        Self::new(0)
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Delay before retry number `retry` (1-based).
    pub fn delay_for(&self, retry: u32) -> Duration {
        let factor = 1u32.checked_shl(retry.saturating_sub(1)).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `operation` until it succeeds, fails with a non-retryable error,
    /// or the retry budget is spent.
    pub async fn run<F, Fut, T>(&self, description: &str, mut operation: F) -> Result<T, LetoError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LetoError>>,
    {
        let mut retries = 0;
        loop {
            match operation().await {
                Ok(value) => {
                    if retries > 0 {
                        tracing::info!(%description, retries, "request succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) if retries < self.max_retries && err.is_retryable() => {
                    retries += 1;
                    let delay = self.delay_for(retries);
                    tracing::warn!(
                        %description,
                        attempt = retries,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "request failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_RETRIES)
    }
}

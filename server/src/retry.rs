use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

/// Distinguishes failures worth retrying from ones that are not.
pub enum RetryError {
    /// Transient failure (network, 5xx, timeouts).
    Retryable(anyhow::Error),
    /// Permanent failure (client errors); retrying would not help.
    NonRetryable(anyhow::Error),
}

/// Exponential backoff policy for upstream fetches.
pub struct Backoff {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Delay before the first retry; doubles each retry after that.
    pub base_delay: Duration,
    /// Fraction of the delay randomized away (0.25 = ±25%), so stacked
    /// clients don't retry in lockstep.
    pub jitter: f64,
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            attempts: 3,
            base_delay: Duration::from_millis(500),
            jitter: 0.25,
        }
    }
}

impl Backoff {
    /// Run `func` until it succeeds, fails permanently, or the attempt
    /// budget runs out. The last transient error is returned as-is.
    pub async fn run<F, Fut, T>(&self, func: F) -> Result<T, RetryError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, RetryError>>,
    {
        let mut attempt = 0;
        loop {
            match func().await {
                Ok(value) => return Ok(value),
                Err(RetryError::Retryable(err)) if attempt + 1 < self.attempts => {
                    let delay = self.delay(attempt);
                    log::warn!(
                        "Upstream attempt {}/{} failed: {}; retrying in {:?}",
                        attempt + 1,
                        self.attempts,
                        err,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn delay(&self, attempt: u32) -> Duration {
        let base = (self.base_delay.as_millis() as u64).saturating_mul(2u64.pow(attempt));
        let spread = (base as f64 * self.jitter) as i64;
        let offset = rand::rng().random_range(-spread..=spread);
        Duration::from_millis(base.saturating_add_signed(offset))
    }
}

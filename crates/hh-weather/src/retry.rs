//! When and how long to wait before asking the weather provider again.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;

use crate::error::WeatherError;

const MAX_DELAY: Duration = Duration::from_secs(10);

/// Timeouts, refused connections, 5xx and 429 are transient. A bad body or an
/// unknown province fails the same way on every attempt.
pub(crate) fn is_retriable(err: &WeatherError) -> bool {
    let WeatherError::Http(e) = err else {
        return false;
    };
    if e.is_timeout() || e.is_connect() {
        return true;
    }
    e.status()
        .is_some_and(|s| s.is_server_error() || s == StatusCode::TOO_MANY_REQUESTS)
}

/// Exponential back-off: `base`, `2 × base`, `4 × base`, ... capped at 10 s,
/// each delay scaled by a random factor in `0.75..=1.25`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RetryPolicy {
    max_retries: u32,
    base: Duration,
}

impl RetryPolicy {
    pub(crate) fn new(max_retries: u32, base_ms: u64) -> Self {
        Self {
            max_retries,
            base: Duration::from_millis(base_ms),
        }
    }

    /// Delay before retry number `retry` (1-based), before jitter.
    fn nominal_delay(self, retry: u32) -> Duration {
        let factor = 1u32 << retry.saturating_sub(1).min(16);
        self.base.saturating_mul(factor).min(MAX_DELAY)
    }

    fn jittered_delay(self, retry: u32) -> Duration {
        self.nominal_delay(retry)
            .mul_f64(rand::rng().random_range(0.75..=1.25))
    }

    /// Run `lookup`, repeating it after a delay while it fails with a
    /// transient error and retries remain.
    pub(crate) async fn run<T, F, Fut>(self, mut lookup: F) -> Result<T, WeatherError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, WeatherError>>,
    {
        let mut retry = 0;
        loop {
            let err = match lookup().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if retry == self.max_retries || !is_retriable(&err) {
                return Err(err);
            }
            retry += 1;

            let delay = self.jittered_delay(retry);
            tracing::warn!(
                retry,
                max_retries = self.max_retries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                error = %err,
                "weather lookup failed; retrying"
            );
            tokio::time::sleep(delay).await;
        }
    }
}

//! Backoff Controller
//!
//! Re-runs a fallible async operation under a [`RetryPolicy`].

use std::future::Future;

use tracing::{debug, warn};

use crate::error::{GrokipediaError, Result};
use crate::retry::RetryPolicy;

/// Runs `operation` until it succeeds, fails permanently, or the policy's
/// attempts are used up.
///
/// Permanent failures (see [`GrokipediaError::is_transient`]) are returned
/// after a single attempt. Transient failures are retried after
/// `policy.delay_for(attempt)`; once the last attempt fails its error is
/// returned unchanged.
///
/// The backoff wait is a plain `tokio::time::sleep`, so dropping the returned
/// future cancels it without affecting any request timeout.
pub async fn execute<T, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;

    loop {
        let error: GrokipediaError = match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!(attempt = attempt + 1, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(err) => err,
        };

        if !error.is_transient() {
            debug!(error = %error, "permanent failure, not retrying");
            return Err(error);
        }

        if attempt + 1 >= max_attempts {
            warn!(attempts = max_attempts, error = %error, "giving up after final attempt");
            return Err(error);
        }

        let delay = policy.delay_for(attempt);
        warn!(
            attempt = attempt + 1,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "transient failure, retrying"
        );
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

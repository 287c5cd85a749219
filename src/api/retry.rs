//! # Retrying Request Invoker
//!
//! Wraps a single asynchronous operation, retrying on rate-limit failures
//! with exponential backoff. The policy is generic: any operation whose
//! error can say whether it was a rate limit goes through the same wrapper.

use std::fmt;
use std::time::Duration;

use log::{debug, warn};

/// Default retry budget for rate-limited requests.
pub const DEFAULT_RETRIES: u32 = 5;
/// Default first backoff delay in milliseconds; doubles on each retry.
pub const DEFAULT_INITIAL_DELAY_MS: u64 = 1000;

/// Classifies an error for the retry policy.
pub trait Recoverable {
    /// True when the failure is a service rate limit (HTTP 429) and the
    /// operation is worth retrying after a delay.
    fn is_rate_limited(&self) -> bool;
}

/// Executes `op`, retrying rate-limited failures up to `retries` times with
/// a doubling delay starting at `initial_delay` (no ceiling, no jitter).
///
/// - Success returns immediately.
/// - A non-rate-limit failure propagates unchanged on first occurrence,
///   regardless of remaining budget.
/// - `retries == 0` means try exactly once.
///
/// Written as a loop rather than recursion so a long retry sequence never
/// grows the call depth.
pub async fn retry_with_backoff<T, E, F, Fut>(
    mut op: F,
    retries: u32,
    initial_delay: Duration,
) -> Result<T, E>
where
    E: Recoverable + fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut remaining = retries;
    let mut delay = initial_delay;

    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if remaining > 0 && err.is_rate_limited() => {
                debug!(
                    "Rate limited ({}), retrying in {:?} ({} retries left)",
                    err, delay, remaining
                );
                tokio::time::sleep(delay).await;
                remaining -= 1;
                delay *= 2;
            }
            Err(err) => {
                if err.is_rate_limited() {
                    warn!("Rate limit retry budget exhausted: {}", err);
                }
                return Err(err);
            }
        }
    }
}

//! Deadline-bounded retries for transient adapter failures
//!
//! A search gets one overall budget. Each attempt is handed an equal share of
//! whatever is left, so a hung navigation fails early enough for another
//! attempt to fit before the caller's own deadline.

use anyhow::{Result, anyhow};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// Substrings marking failures another attempt cannot fix
const PERMANENT_MARKERS: &[&str] = &[
    "browser closed",
    "browser disconnected",
    "page closed",
    "target closed",
    "session not found",
    "session closed",
    "no response from the chromium instance",
    "channel",
    "captcha",
    "websocket",
];

/// Whether `error` is worth another attempt.
///
/// Broken browser state and CAPTCHAs are permanent. Timeouts, network
/// trouble and rate limiting are transient. Anything unrecognised is retried.
pub(crate) fn is_retryable_error(error: &anyhow::Error) -> bool {
    let text = format!("{error:#}").to_lowercase();
    let missing_frame = text.contains("frame") && text.contains("not found");
    !missing_frame && !PERMANENT_MARKERS.iter().any(|m| text.contains(m))
}

/// Pause after failed attempt number `attempt` (0-based): 2^attempt seconds
/// plus up to one second of jitter
pub(crate) fn backoff_delay(attempt: u32) -> Duration {
    let base = 2u64.saturating_pow(attempt).saturating_mul(1000);
    Duration::from_millis(base + rand::rng().random_range(0..1000))
}

/// Run `attempt` until it succeeds, fails permanently, runs out of retries
/// or runs out of `budget`.
///
/// `attempt` receives its own time slice and is cut off when the slice
/// elapses. No retry starts if its backoff would end past the budget.
pub async fn retry_within<F, Fut, T>(
    budget: Duration,
    max_retries: u32,
    mut attempt: F,
) -> Result<T>
where
    F: FnMut(Duration) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let deadline = Instant::now() + budget;
    let mut retries = 0;

    loop {
        let attempts_left = max_retries - retries + 1;
        let slice = deadline.saturating_duration_since(Instant::now()) / attempts_left;
        debug!(attempt = retries + 1, slice_ms = slice.as_millis() as u64, "Search attempt");

        let error = match tokio::time::timeout(slice, attempt(slice)).await {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(e)) => e,
            Err(_) => anyhow!("Attempt timeout after {}ms", slice.as_millis()),
        };

        if !is_retryable_error(&error) {
            warn!("Permanent failure, not retrying: {error:#}");
            return Err(error);
        }
        if retries >= max_retries {
            warn!("Giving up after {} retries: {error:#}", max_retries);
            return Err(error);
        }

        let delay = backoff_delay(retries);
        if Instant::now() + delay >= deadline {
            warn!("No time left to retry: {error:#}");
            return Err(error);
        }

        retries += 1;
        warn!(
            "Attempt failed, retry {retries}/{max_retries} in {}ms: {error:#}",
            delay.as_millis()
        );
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn captcha_and_closed_pages_are_permanent() {
        assert!(!is_retryable_error(&anyhow!("CAPTCHA page presented")));
        assert!(!is_retryable_error(&anyhow!("Target closed")));
        assert!(!is_retryable_error(&anyhow!("Frame 42 not found")));
        assert!(is_retryable_error(&anyhow!("Navigation timeout after 30 seconds")));
        assert!(is_retryable_error(&anyhow!("something odd")));
    }

    #[test]
    fn backoff_grows_exponentially() {
        let first = backoff_delay(0);
        let third = backoff_delay(2);
        assert!(first >= Duration::from_millis(1000) && first < Duration::from_millis(2000));
        assert!(third >= Duration::from_millis(4000) && third < Duration::from_millis(5000));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_are_retried_until_success() {
        let calls = AtomicU32::new(0);
        let out = retry_within(Duration::from_secs(60), 2, |_| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(anyhow!("network hiccup"))
                } else {
                    Ok(n)
                }
            }
        })
        .await
        .unwrap();
        assert_eq!(out, 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_errors_fail_fast() {
        let calls = AtomicU32::new(0);
        let err = retry_within(Duration::from_secs(60), 5, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(anyhow!("captcha detected")) }
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("captcha"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn hung_first_attempt_is_retried_inside_budget() {
        let start = Instant::now();
        let calls = AtomicU32::new(0);
        let slices = std::sync::Mutex::new(Vec::new());

        let out = retry_within(Duration::from_secs(30), 2, |slice| {
            slices.lock().unwrap().push(slice);
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n == 0 {
                    // Stands in for a navigation that never completes
                    std::future::pending::<()>().await;
                }
                Ok("results")
            }
        })
        .await
        .unwrap();

        assert_eq!(out, "results");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(slices.lock().unwrap()[0], Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(30));
    }

    #[tokio::test(start_paused = true)]
    async fn no_retry_when_backoff_would_pass_the_deadline() {
        let calls = AtomicU32::new(0);
        let err = retry_within(Duration::from_millis(900), 2, |_| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err::<(), _>(anyhow!("connection reset")) }
        })
        .await
        .unwrap_err();
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! Retry with exponential back-off and jitter for provider requests.
//!
//! Only transient failures are retried: timeouts, connection errors, 5xx
//! responses, and 429s. Everything else is returned on the first attempt.

use std::future::Future;
use std::time::Duration;

use crate::error::ProviderError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` for errors that are worth retrying after a back-off delay.
pub(crate) fn is_retriable(err: &ProviderError) -> bool {
    match err {
        ProviderError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ProviderError::RateLimited { .. } => true,
        ProviderError::UnexpectedStatus { status, .. } => *status >= 500,
        ProviderError::Deserialize { .. } | ProviderError::InvalidBaseUrl { .. } => false,
    }
}

/// Sleep before retry number `retry` (1-based) after `err`.
///
/// `base * 2^(retry-1)` ms scaled by `jitter` (expected in `0.75..=1.25`),
/// capped at 30 s. A `Retry-After` hint wins when it asks for longer.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn backoff_delay(retry: u32, backoff_base_ms: u64, jitter: f64, err: &ProviderError) -> Duration {
    let exponential = backoff_base_ms
        .saturating_mul(1u64 << retry.saturating_sub(1).min(10))
        .min(MAX_DELAY_MS);
    let jittered = (exponential as f64 * jitter) as u64;
    let hinted = match err {
        ProviderError::RateLimited {
            retry_after_secs, ..
        } => retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS),
        _ => 0,
    };
    Duration::from_millis(jittered.max(hinted))
}

/// Runs `operation`, retrying transient failures up to `max_retries` times.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ProviderError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ProviderError>>,
{
    let mut retry = 0u32;
    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if retry < max_retries && is_retriable(&err) => err,
            Err(err) => return Err(err),
        };
        retry += 1;
        let jitter = 0.75 + rand::random::<f64>() * 0.5;
        let delay = backoff_delay(retry, backoff_base_ms, jitter, &err);
        tracing::warn!(
            retry,
            max_retries,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            error = %err,
            "transient provider error, retrying after back-off"
        );
        tokio::time::sleep(delay).await;
    }
}

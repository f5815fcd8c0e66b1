//! Bounded retry with exponential backoff for snapshot saves
//!
//! Only persistence errors are retried; validation and not-found errors
//! fail immediately. The policy is injectable so tests can run with
//! millisecond delays.

use shopfront_common::{Error, Result};
use std::time::Duration;

/// Retry policy for save operations
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay before the first retry; doubles after each failure
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

/// Run `operation` until it succeeds or the policy is exhausted
///
/// # Arguments
/// * `operation_name` - Name for logging (e.g., "snapshot save")
/// * `policy` - Attempt count and backoff base
/// * `operation` - Closure performing the fallible operation
pub async fn with_backoff<F, Fut, T>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    if policy.max_attempts == 0 {
        return Err(Error::Internal(format!(
            "{operation_name}: retry policy allows zero attempts"
        )));
    }

    let mut delay = policy.base_delay;

    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    tracing::info!(
                        operation = operation_name,
                        attempt,
                        "Operation succeeded after retry"
                    );
                }
                return Ok(result);
            }
            Err(err) => {
                let retryable = matches!(err, Error::Persistence(_));
                if !retryable || attempt == policy.max_attempts {
                    tracing::error!(
                        operation = operation_name,
                        attempt,
                        error = %err,
                        "Operation failed, giving up"
                    );
                    return Err(err);
                }
                tracing::warn!(
                    operation = operation_name,
                    attempt,
                    backoff_ms = delay.as_millis() as u64,
                    error = %err,
                    "Operation failed, will retry after backoff"
                );
                tokio::time::sleep(delay).await;
                delay *= 2;
            }
        }
    }

    unreachable!("retry loop always returns within max_attempts")
}

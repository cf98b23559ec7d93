//! Bounded retry with exponential backoff
//!
//! The first attempt runs immediately. After attempt `k` fails, and while
//! `k < max_attempts`, the policy sleeps for
//! `initial_delay * backoff_multiplier^(k-1)` (capped at `max_delay`) and
//! tries again. The sleep is a plain timer await, so callers must not hold
//! locks or open handles across [`RetryPolicy::run`].

use crate::config::RetryConfig;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// Error returned when every attempt failed
#[derive(Debug)]
pub struct RetryExhausted<E> {
    /// Number of attempts made
    pub attempts: u32,

    /// Error from the final attempt
    pub last_error: E,
}

impl<E: fmt::Display> fmt::Display for RetryExhausted<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gave up after {} attempt(s): {}",
            self.attempts, self.last_error
        )
    }
}

impl<E: std::error::Error + 'static> std::error::Error for RetryExhausted<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.last_error)
    }
}

/// Retry policy with exponential backoff
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    max_attempts: u32,
    initial_delay: Duration,
    backoff_multiplier: f64,
    max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a new policy
    ///
    /// `max_attempts` is clamped to at least 1 and `backoff_multiplier` to at
    /// least 1.0.
    pub fn new(max_attempts: u32, initial_delay: Duration, backoff_multiplier: f64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            initial_delay,
            backoff_multiplier: if backoff_multiplier.is_finite() {
                backoff_multiplier.max(1.0)
            } else {
                1.0
            },
            max_delay: Duration::MAX,
        }
    }

    /// Caps every computed delay
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Builds a policy from the `[export.retry]` configuration section
    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(
            config.max_attempts,
            Duration::from_millis(config.initial_delay_ms),
            config.backoff_multiplier,
        )
        .with_max_delay(Duration::from_millis(config.max_delay_ms))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay to wait after attempt `attempt` (1-based) has failed
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.backoff_multiplier.powi(exponent);
        let millis = (self.initial_delay.as_millis() as f64 * factor).round();

        if !millis.is_finite() || millis >= self.max_delay.as_millis() as f64 {
            return self.max_delay;
        }
        Duration::from_millis(millis as u64)
    }

    /// Runs `operation` until it succeeds or the attempts are used up.
    ///
    /// # Errors
    ///
    /// Returns [`RetryExhausted`] carrying the last error after
    /// `max_attempts` failures.
    pub async fn run<T, E, F, Fut>(
        &self,
        operation_name: &str,
        operation: F,
    ) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        self.run_if(operation_name, operation, |_| true).await
    }

    /// Like [`RetryPolicy::run`], but stops at the first error for which
    /// `is_retryable` returns false.
    ///
    /// # Errors
    ///
    /// Returns [`RetryExhausted`] with the attempts made so far and the last
    /// error.
    pub async fn run_if<T, E, F, Fut, P>(
        &self,
        operation_name: &str,
        mut operation: F,
        is_retryable: P,
    ) -> Result<T, RetryExhausted<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        tracing::info!(
                            operation = operation_name,
                            attempt = attempt,
                            "Operation succeeded after retry"
                        );
                    }
                    return Ok(value);
                }
                Err(e) if !is_retryable(&e) => {
                    tracing::debug!(
                        operation = operation_name,
                        attempt = attempt,
                        error = %e,
                        "Error is not retryable"
                    );
                    return Err(RetryExhausted {
                        attempts: attempt,
                        last_error: e,
                    });
                }
                Err(e) => {
                    if attempt >= self.max_attempts {
                        tracing::error!(
                            operation = operation_name,
                            attempts = attempt,
                            error = %e,
                            "Retry attempts exhausted"
                        );
                        return Err(RetryExhausted {
                            attempts: attempt,
                            last_error: e,
                        });
                    }

                    let delay = self.delay_after(attempt);
                    crate::log_retry_attempt!(
                        operation_name,
                        attempt,
                        self.max_attempts,
                        delay.as_millis() as u64,
                        &e
                    );

                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}

//! Retry with a constant pause between attempts.

use super::strategy::{RetryPolicy, RetryStrategy, positive_integer, validate_max_retries};
use crate::error::Result;
use crate::options::{DELAY, DELAY_SECONDS, RetryOptions};
use crate::sleep::{Sleeper, default_sleeper};
use std::sync::Arc;
use std::time::Duration;
use tracing::{Span, debug};

/// Retries up to `max_retries` times, sleeping `delay_seconds` after each failure.
///
/// Recognized options: `max_retries`, `delay_seconds` (or `delay`).
///
/// # Examples
///
/// ```rust,no_run
/// use steadfast::prelude::*;
///
/// let retrier = FixedDelayRetry::new()
///     .configure(RetryOptions::new().max_retries(5).delay_seconds(2))
///     .unwrap();
///
/// let result = retrier.execute(|| std::fs::read_to_string("/tmp/flaky"));
/// ```
#[derive(Debug, Clone)]
pub struct FixedDelayRetry {
    span: Span,
    sleeper: Arc<dyn Sleeper>,
}

impl FixedDelayRetry {
    /// Create a fixed-delay strategy that blocks the calling thread.
    pub fn new() -> Self {
        Self {
            span: Span::none(),
            sleeper: default_sleeper(),
        }
    }

    /// Record attempt diagnostics under `span`.
    pub fn with_logger(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Use `sleeper` for the pause between attempts.
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }
}

impl Default for FixedDelayRetry {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryStrategy for FixedDelayRetry {
    type Policy = FixedDelayPolicy;

    fn name(&self) -> &'static str {
        "fixed_delay"
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn validate(&self, options: &RetryOptions) -> Result<FixedDelayPolicy> {
        let delay_seconds = positive_integer(options, DELAY_SECONDS, &[DELAY])?;
        let max_retries = validate_max_retries(options)?;

        Ok(FixedDelayPolicy {
            max_retries,
            delay: Duration::from_secs(delay_seconds),
            sleeper: Arc::clone(&self.sleeper),
        })
    }
}

/// Validated [`FixedDelayRetry`] configuration.
#[derive(Debug, Clone)]
pub struct FixedDelayPolicy {
    max_retries: u32,
    delay: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl FixedDelayPolicy {
    /// Pause taken after each failed attempt.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl RetryPolicy for FixedDelayPolicy {
    type State = ();

    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn start(&self) {}

    fn on_retry(&self, _state: &mut (), attempt: u32) {
        debug!(attempt, delay = ?self.delay, "waiting before next attempt");
        self.sleeper.sleep(self.delay);
    }
}

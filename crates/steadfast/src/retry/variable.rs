//! Retry with pauses drawn from a lazy delay sequence.

use super::strategy::{RetryPolicy, RetryStrategy, validate_max_retries};
use crate::error::{Error, Result};
use crate::guards::{assert_present, describe};
use crate::options::{DELAY_GENERATOR, DELAY_SEQUENCE, OptionValue, RetryOptions};
use crate::sequence::{DelayCursor, DelaySequence};
use crate::sleep::{Sleeper, default_sleeper};
use std::sync::Arc;
use tracing::{Span, debug};

/// Retries up to `max_retries` times, sleeping for the next value of a
/// [`DelaySequence`] after each failure.
///
/// Recognized options: `max_retries`, `delay_sequence` (or `delay_generator`).
/// The sequence must be lazy; lists, numbers and strings are rejected.
///
/// Each wrapped operation walks its own cursor over the sequence. The cursor
/// is not rewound between calls, so the second call of a wrapped operation
/// continues where the first one stopped.
#[derive(Debug, Clone)]
pub struct VariableDelayRetry {
    span: Span,
    sleeper: Arc<dyn Sleeper>,
}

impl VariableDelayRetry {
    /// Create a variable-delay strategy that blocks the calling thread.
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

impl Default for VariableDelayRetry {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryStrategy for VariableDelayRetry {
    type Policy = VariableDelayPolicy;

    fn name(&self) -> &'static str {
        "variable_delay"
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn validate(&self, options: &RetryOptions) -> Result<VariableDelayPolicy> {
        let entry = options.get_any_entry(DELAY_SEQUENCE, &[DELAY_GENERATOR]);
        let (key, value) = *assert_present(DELAY_SEQUENCE, entry.as_ref())?;
        let sequence = match value {
            OptionValue::Sequence(sequence) => sequence.clone(),
            OptionValue::Value(value) if value.is_null() => {
                return Err(Error::missing(key));
            }
            OptionValue::Value(value) => {
                return Err(Error::invalid_argument(
                    key,
                    format!("expected a lazy delay sequence but got {}", describe(value)),
                ));
            }
        };
        let max_retries = validate_max_retries(options)?;

        Ok(VariableDelayPolicy {
            max_retries,
            sequence,
            sleeper: Arc::clone(&self.sleeper),
        })
    }
}

/// Validated [`VariableDelayRetry`] configuration.
#[derive(Debug, Clone)]
pub struct VariableDelayPolicy {
    max_retries: u32,
    sequence: DelaySequence,
    sleeper: Arc<dyn Sleeper>,
}

impl VariableDelayPolicy {
    /// The sequence each wrapped operation draws its delays from.
    pub fn sequence(&self) -> &DelaySequence {
        &self.sequence
    }
}

impl RetryPolicy for VariableDelayPolicy {
    type State = DelayCursor;

    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn start(&self) -> DelayCursor {
        self.sequence.cursor()
    }

    fn on_retry(&self, cursor: &mut DelayCursor, attempt: u32) {
        let delay = cursor.next_delay();
        debug!(attempt, ?delay, "waiting before next attempt");
        self.sleeper.sleep(delay);
    }
}

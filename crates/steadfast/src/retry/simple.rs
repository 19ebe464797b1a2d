//! Retry a fixed number of times without waiting.

use super::strategy::{RetryPolicy, RetryStrategy, validate_max_retries};
use crate::error::Result;
use crate::options::RetryOptions;
use tracing::Span;

/// Retries immediately, up to `max_retries` attempts.
///
/// Recognized options: `max_retries`.
#[derive(Debug, Clone)]
pub struct SimpleRetry {
    span: Span,
}

impl SimpleRetry {
    /// Create a simple retry strategy.
    pub fn new() -> Self {
        Self { span: Span::none() }
    }

    /// Record attempt diagnostics under `span`.
    pub fn with_logger(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Default for SimpleRetry {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryStrategy for SimpleRetry {
    type Policy = SimplePolicy;

    fn name(&self) -> &'static str {
        "simple"
    }

    fn span(&self) -> &Span {
        &self.span
    }

    fn validate(&self, options: &RetryOptions) -> Result<SimplePolicy> {
        Ok(SimplePolicy {
            max_retries: validate_max_retries(options)?,
        })
    }
}

/// Validated [`SimpleRetry`] configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimplePolicy {
    max_retries: u32,
}

impl RetryPolicy for SimplePolicy {
    type State = ();

    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn start(&self) {}

    fn on_retry(&self, _state: &mut (), _attempt: u32) {}
}

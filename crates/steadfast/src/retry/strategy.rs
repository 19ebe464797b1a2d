//! The retry protocol shared by every strategy.

use super::wrapped::{Wrapped, run_attempts};
use crate::error::{Error, Result};
use crate::guards;
use crate::options::{MAX_RETRIES, OptionValue, RetryOptions};
use tracing::{Span, debug};

/// A retry policy type: validates named options into a [`RetryPolicy`].
///
/// Implementations only decide which options they need and how to check them.
/// The attempt loop itself is shared and lives behind [`Retrier`].
///
/// # Examples
///
/// ```rust
/// use steadfast::prelude::*;
///
/// let retrier = SimpleRetry::new()
///     .configure(RetryOptions::new().max_retries(3))
///     .unwrap();
///
/// let mut calls = 0;
/// let result = retrier.execute(|| {
///     calls += 1;
///     if calls < 3 { Err("not yet") } else { Ok(calls) }
/// });
/// assert_eq!(result, Ok(3));
/// ```
pub trait RetryStrategy {
    /// The validated configuration this strategy produces.
    type Policy: RetryPolicy;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Span attempt diagnostics are recorded under.
    fn span(&self) -> &Span;

    /// Validate `options` and build a policy.
    ///
    /// Implementations check their own options first and then call
    /// [`validate_max_retries`].
    fn validate(&self, options: &RetryOptions) -> Result<Self::Policy>;

    /// Validate `options` and return a [`Retrier`] ready to wrap operations.
    ///
    /// Fails with [`Error::InvalidArgument`] without invoking anything.
    fn configure(&self, options: RetryOptions) -> Result<Retrier<Self::Policy>> {
        let policy = self.validate(&options).inspect_err(|err| {
            debug!(parent: self.span(), strategy = self.name(), %err, "retry configuration rejected");
        })?;
        debug!(
            parent: self.span(),
            strategy = self.name(),
            max_retries = policy.max_retries(),
            "retry strategy configured"
        );
        Ok(Retrier {
            policy,
            options,
            span: self.span().clone(),
        })
    }
}

/// A validated retry configuration together with its per-failure side effect.
///
/// A policy is immutable. Anything that advances from one failure to the next
/// lives in [`RetryPolicy::State`], which is created per wrapped operation.
pub trait RetryPolicy {
    /// Per wrapped operation state, e.g. a delay cursor.
    type State;

    /// Maximum number of attempts per invocation.
    fn max_retries(&self) -> u32;

    /// Create the state for a newly wrapped operation.
    fn start(&self) -> Self::State;

    /// Runs after every failed attempt, once `attempt` has been incremented.
    ///
    /// This also runs after the final failed attempt, right before the
    /// failure is handed back.
    fn on_retry(&self, state: &mut Self::State, attempt: u32);
}

/// Validate the `max_retries` option shared by every strategy.
pub fn validate_max_retries(options: &RetryOptions) -> Result<u32> {
    let n = positive_integer(options, MAX_RETRIES, &[])?;
    u32::try_from(n)
        .map_err(|_| Error::invalid_argument(MAX_RETRIES, format!("must not exceed {}", u32::MAX)))
}

/// Read an integer option that must be at least 1.
///
/// Errors name the key the caller actually supplied, which may be an alias.
pub(crate) fn positive_integer(options: &RetryOptions, name: &str, aliases: &[&str]) -> Result<u64> {
    let (key, value) = match options.get_any_entry(name, aliases) {
        Some((key, OptionValue::Value(value))) => (key, Some(value)),
        Some((key, OptionValue::Sequence(_))) => {
            return Err(Error::invalid_argument(
                key,
                "expected an integer but got a delay sequence",
            ));
        }
        None => (name, None),
    };

    let n: i64 = guards::assert_type(key, value)?;
    guards::assert_true(key, Some(n >= 1), "must be an integer of at least 1")?;
    u64::try_from(n).map_err(|_| Error::invalid_argument(key, "must be an integer of at least 1"))
}

/// A strategy after successful configuration.
///
/// Holds the validated policy and the options it was built from. A retrier
/// can wrap any number of operations; each gets its own policy state.
#[derive(Debug, Clone)]
pub struct Retrier<P> {
    policy: P,
    options: RetryOptions,
    span: Span,
}

impl<P: RetryPolicy> Retrier<P> {
    /// The validated policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The options this retrier was configured with.
    pub fn options(&self) -> &RetryOptions {
        &self.options
    }

    /// Maximum number of attempts per invocation.
    pub fn max_retries(&self) -> u32 {
        self.policy.max_retries()
    }

    /// Wrap `operation` with this retrier's policy.
    ///
    /// The returned [`Wrapped`] keeps its policy state between calls.
    pub fn wrap<F>(&self, operation: F) -> Wrapped<P, F>
    where
        P: Clone,
    {
        Wrapped::new(self.policy.clone(), operation, self.span.clone())
    }

    /// Run `operation` once under this policy, with fresh policy state.
    pub fn execute<F, T, E>(&self, mut operation: F) -> std::result::Result<T, E>
    where
        F: FnMut() -> std::result::Result<T, E>,
    {
        let mut state = self.policy.start();
        run_attempts(&self.policy, &mut state, &self.span, &mut operation)
    }
}

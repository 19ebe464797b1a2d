//! The attempt loop and the wrapped operation it drives.

use super::strategy::RetryPolicy;
use std::fmt;
use tracing::{Span, debug, warn};

/// Run `attempt` until it succeeds or `policy.max_retries()` attempts fail.
///
/// The final failure is returned untouched.
pub(crate) fn run_attempts<P, F, T, E>(
    policy: &P,
    state: &mut P::State,
    span: &Span,
    mut attempt_once: F,
) -> Result<T, E>
where
    P: RetryPolicy,
    F: FnMut() -> Result<T, E>,
{
    let _entered = span.enter();
    let max_retries = policy.max_retries();
    let mut attempt = 0;

    loop {
        match attempt_once() {
            Ok(result) => {
                if attempt > 0 {
                    debug!(failed_attempts = attempt, "operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(err) => {
                attempt += 1;
                debug!(attempt, max_retries, "attempt failed");
                policy.on_retry(state, attempt);
                if attempt >= max_retries {
                    warn!(attempts = attempt, "retries exhausted, returning last failure");
                    return Err(err);
                }
            }
        }
    }
}

/// An operation bound to a retry policy.
///
/// Calling it runs the attempt loop. Policy state (such as the position in a
/// delay sequence) carries over from one call to the next.
///
/// # Examples
///
/// ```rust
/// use steadfast::prelude::*;
///
/// let retrier = SimpleRetry::new()
///     .configure(RetryOptions::new().max_retries(2))
///     .unwrap();
///
/// let mut parse = retrier.wrap(|input: &str| input.parse::<i32>());
/// assert_eq!(parse.call_with("42"), Ok(42));
/// assert!(parse.call_with("forty-two").is_err());
/// ```
pub struct Wrapped<P: RetryPolicy, F> {
    policy: P,
    state: P::State,
    operation: F,
    span: Span,
}

impl<P: RetryPolicy, F> Wrapped<P, F> {
    pub(crate) fn new(policy: P, operation: F, span: Span) -> Self {
        let state = policy.start();
        Self {
            policy,
            state,
            operation,
            span,
        }
    }

    /// The policy this operation runs under.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// The policy state carried between calls.
    pub fn state(&self) -> &P::State {
        &self.state
    }

    /// Recover the underlying operation.
    pub fn into_inner(self) -> F {
        self.operation
    }

    /// Invoke a zero-argument operation with retries.
    pub fn call<T, E>(&mut self) -> Result<T, E>
    where
        F: FnMut() -> Result<T, E>,
    {
        run_attempts(
            &self.policy,
            &mut self.state,
            &self.span,
            &mut self.operation,
        )
    }

    /// Invoke an operation taking `args`, cloning them for every attempt.
    pub fn call_with<A, T, E>(&mut self, args: A) -> Result<T, E>
    where
        A: Clone,
        F: FnMut(A) -> Result<T, E>,
    {
        let operation = &mut self.operation;
        run_attempts(&self.policy, &mut self.state, &self.span, || {
            operation(args.clone())
        })
    }
}

impl<P, F> fmt::Debug for Wrapped<P, F>
where
    P: RetryPolicy + fmt::Debug,
    P::State: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Wrapped")
            .field("policy", &self.policy)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Wrap `operation` with an already validated `policy`.
///
/// Attempt diagnostics are emitted without a parent span.
pub fn wrap<P: RetryPolicy, F>(policy: P, operation: F) -> Wrapped<P, F> {
    Wrapped::new(policy, operation, Span::none())
}

#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Retry strategies for fallible synchronous operations.
//!
//! Pick a strategy, configure it with named options, and wrap an operation.
//! The wrapped operation is retried until it succeeds or the configured number
//! of attempts fail; the last failure is returned exactly as the operation
//! produced it.
//!
//! - **[`SimpleRetry`]** retries immediately
//! - **[`FixedDelayRetry`]** sleeps a constant number of seconds between attempts
//! - **[`VariableDelayRetry`]** sleeps for successive values of a lazy [`DelaySequence`]
//!
//! Options are validated by `configure`, before anything is invoked. Options
//! can be built in code or loaded from JSON, TOML or environment variables
//! (see [`RetryOptions`]).
//!
//! # Examples
//!
//! ```rust
//! use steadfast::prelude::*;
//! use std::time::Duration;
//!
//! let retrier = VariableDelayRetry::new()
//!     .configure(
//!         RetryOptions::new()
//!             .max_retries(3)
//!             .delay_sequence(DelaySequence::constant(Duration::from_millis(1))),
//!     )
//!     .unwrap();
//!
//! let mut calls = 0;
//! let result = retrier.execute(|| {
//!     calls += 1;
//!     if calls < 3 { Err("busy") } else { Ok("done") }
//! });
//! assert_eq!(result, Ok("done"));
//!
//! // Invalid options never reach the operation.
//! assert!(SimpleRetry::new().configure(RetryOptions::new().max_retries(0)).is_err());
//! ```
//!
//! # Logging
//!
//! Attempts are reported through [`tracing`]. Each strategy accepts an
//! optional span via `with_logger`; the attempt loop runs inside it.

pub mod error;
pub mod guards;
pub mod options;
pub mod retry;
pub mod sequence;
pub mod sleep;

pub use error::{Error, Result};
pub use options::RetryOptions;
pub use retry::{
    FixedDelayRetry, Retrier, RetryPolicy, RetryStrategy, SimpleRetry, VariableDelayRetry, Wrapped,
    wrap,
};
pub use sequence::DelaySequence;

/// Convenient re-exports of commonly used items.
///
/// Import everything needed to configure and wrap operations with:
///
/// ```rust
/// use steadfast::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::options::RetryOptions;
    pub use crate::retry::{
        FixedDelayRetry, Retrier, RetryPolicy, RetryStrategy, SimpleRetry, VariableDelayRetry,
        Wrapped, wrap,
    };
    pub use crate::sequence::DelaySequence;
    pub use crate::sleep::{Sleeper, ThreadSleeper};
}

//! Retry strategies and the attempt loop they share.
//!
//! # Key Types
//!
//! - [`RetryStrategy`] - validates named options into a policy
//! - [`RetryPolicy`] - a validated configuration with its per-failure hook
//! - [`Retrier`] - a configured strategy, ready to wrap operations
//! - [`Wrapped`] - an operation bound to a policy
//!
//! # Strategies
//!
//! | Strategy | Options | After each failure |
//! |---|---|---|
//! | [`SimpleRetry`] | `max_retries` | nothing |
//! | [`FixedDelayRetry`] | `max_retries`, `delay_seconds` | sleep `delay_seconds` |
//! | [`VariableDelayRetry`] | `max_retries`, `delay_sequence` | sleep for the next delay |
//!
//! # Examples
//!
//! ```rust
//! use steadfast::prelude::*;
//!
//! let retrier = SimpleRetry::new()
//!     .configure(RetryOptions::new().max_retries(3))
//!     .unwrap();
//!
//! let mut attempts = 0;
//! let mut flaky = retrier.wrap(move || {
//!     attempts += 1;
//!     if attempts < 2 {
//!         Err(std::io::Error::other("transient"))
//!     } else {
//!         Ok(attempts)
//!     }
//! });
//!
//! assert_eq!(flaky.call().unwrap(), 2);
//! ```

mod fixed;
mod simple;
mod strategy;
mod variable;
mod wrapped;

pub use fixed::{FixedDelayPolicy, FixedDelayRetry};
pub use simple::{SimplePolicy, SimpleRetry};
pub use strategy::{Retrier, RetryPolicy, RetryStrategy, validate_max_retries};
pub use variable::{VariableDelayPolicy, VariableDelayRetry};
pub use wrapped::{Wrapped, wrap};

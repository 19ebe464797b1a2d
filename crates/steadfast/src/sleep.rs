//! The blocking wait performed between attempts.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Blocks the calling thread between attempts.
///
/// The delaying strategies call [`Sleeper::sleep`] from their retry hook. The
/// default, [`ThreadSleeper`], parks the current thread; tests substitute an
/// implementation that records the requested durations instead.
pub trait Sleeper: Send + Sync + fmt::Debug {
    /// Wait for `duration` before returning.
    fn sleep(&self, duration: Duration);
}

/// Sleeper backed by [`std::thread::sleep`].
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

impl<S: Sleeper + ?Sized> Sleeper for Arc<S> {
    fn sleep(&self, duration: Duration) {
        (**self).sleep(duration);
    }
}

pub(crate) fn default_sleeper() -> Arc<dyn Sleeper> {
    Arc::new(ThreadSleeper)
}

/// Sleepers for exercising retry code without waiting.
pub mod testing {
    use super::*;
    use std::sync::{Mutex, PoisonError};

    /// Records requested sleeps instead of blocking.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use steadfast::prelude::*;
    /// use steadfast::sleep::testing::RecordingSleeper;
    ///
    /// let sleeper = RecordingSleeper::new();
    /// let retrier = FixedDelayRetry::new()
    ///     .with_sleeper(sleeper.clone())
    ///     .configure(RetryOptions::new().max_retries(2).delay_seconds(5))
    ///     .unwrap();
    ///
    /// assert!(retrier.execute(|| Err::<(), _>("down")).is_err());
    /// assert_eq!(sleeper.total(), Duration::from_secs(10));
    /// ```
    #[derive(Debug, Default)]
    pub struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        /// Create a shareable recorder.
        pub fn new() -> Arc<Self> {
            Arc::new(Self::default())
        }

        /// Every requested duration, in order.
        pub fn slept(&self) -> Vec<Duration> {
            self.slept
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Sum of every requested duration, saturating at `Duration::MAX`.
        pub fn total(&self) -> Duration {
            self.slept()
                .into_iter()
                .fold(Duration::ZERO, Duration::saturating_add)
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(duration);
        }
    }
}

//! Lazy delay sequences for [`VariableDelayRetry`](crate::retry::VariableDelayRetry).
//!
//! A [`DelaySequence`] is a recipe, not a collection: every wrapped operation
//! asks it for a fresh [`DelayCursor`] and pulls one delay per failed attempt.
//! Sharing a sequence between wrapped operations therefore never shares
//! progress between them.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

type BoxedDelays = Box<dyn Iterator<Item = Duration> + Send>;
type Factory = dyn Fn() -> BoxedDelays + Send + Sync;

/// A lazy, possibly infinite source of retry delays.
///
/// # Examples
///
/// ```rust
/// use steadfast::DelaySequence;
/// use std::time::Duration;
///
/// // 1s, 2s, 3s, ...
/// let linear = DelaySequence::new(|| (1..).map(Duration::from_secs));
///
/// // Doubling from 100ms, capped at 5s
/// let backoff = DelaySequence::exponential(
///     Duration::from_millis(100),
///     2.0,
///     Duration::from_secs(5),
/// );
/// ```
#[derive(Clone)]
pub struct DelaySequence {
    factory: Arc<Factory>,
}

impl DelaySequence {
    /// Create a sequence from a closure returning a fresh iterator of delays.
    ///
    /// The closure runs once per wrapped operation.
    pub fn new<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = Duration>,
        I::IntoIter: Send + 'static,
    {
        Self {
            factory: Arc::new(move || Box::new(factory().into_iter()) as BoxedDelays),
        }
    }

    /// Create a sequence from a closure returning whole seconds.
    pub fn from_secs<F, I>(factory: F) -> Self
    where
        F: Fn() -> I + Send + Sync + 'static,
        I: IntoIterator<Item = u64>,
        I::IntoIter: Send + 'static,
    {
        Self::new(move || factory().into_iter().map(Duration::from_secs))
    }

    /// Create a sequence from a function of the 1-based failed attempt number.
    ///
    /// The sequence ends at the first `None`.
    pub fn from_fn<F>(delay_for: F) -> Self
    where
        F: Fn(u32) -> Option<Duration> + Send + Sync + 'static,
    {
        let delay_for = Arc::new(delay_for);
        Self::new(move || {
            let delay_for = Arc::clone(&delay_for);
            (1u32..).map_while(move |attempt| (*delay_for)(attempt))
        })
    }

    /// The same delay forever.
    pub fn constant(delay: Duration) -> Self {
        Self::new(move || std::iter::repeat(delay))
    }

    /// `initial`, `initial + step`, `initial + 2 * step`, ...
    pub fn linear(initial: Duration, step: Duration) -> Self {
        Self::new(move || (0u32..).map(move |n| initial.saturating_add(step.saturating_mul(n))))
    }

    /// `initial * multiplier^n`, capped at `max`.
    ///
    /// Multipliers below 1.0 are clamped to 1.0. Delays too large to represent
    /// saturate at `max`, so `Duration::MAX` works as an uncapped sequence.
    pub fn exponential(initial: Duration, multiplier: f64, max: Duration) -> Self {
        let multiplier = multiplier.max(1.0);
        Self::new(move || {
            (0..i32::MAX).map(move |n| {
                let secs = initial.as_secs_f64() * multiplier.powi(n);
                Duration::try_from_secs_f64(secs).map_or(max, |delay| delay.min(max))
            })
        })
    }

    /// Start a new cursor at the beginning of the sequence.
    pub fn cursor(&self) -> DelayCursor {
        DelayCursor {
            delays: Box::new((*self.factory)().fuse()),
            last: None,
            pulled: 0,
            exhausted: false,
        }
    }
}

impl fmt::Debug for DelaySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelaySequence").finish_non_exhaustive()
    }
}

/// Position within a [`DelaySequence`].
///
/// Once the underlying iterator runs dry the cursor keeps returning the last
/// delay it produced, or zero if it never produced one.
pub struct DelayCursor {
    delays: BoxedDelays,
    last: Option<Duration>,
    pulled: u32,
    exhausted: bool,
}

impl DelayCursor {
    /// Pull the next delay.
    pub fn next_delay(&mut self) -> Duration {
        match self.delays.next() {
            Some(delay) => {
                self.last = Some(delay);
                self.pulled += 1;
                delay
            }
            None => {
                let delay = self.last.unwrap_or(Duration::ZERO);
                if !self.exhausted {
                    self.exhausted = true;
                    warn!(
                        pulled = self.pulled,
                        ?delay,
                        "delay sequence exhausted, repeating last delay"
                    );
                }
                delay
            }
        }
    }

    /// Number of values pulled from the sequence so far.
    pub fn pulled(&self) -> u32 {
        self.pulled
    }

    /// Whether the underlying sequence has run dry.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}

impl fmt::Debug for DelayCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DelayCursor")
            .field("last", &self.last)
            .field("pulled", &self.pulled)
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

//! The per-step verdict produced by a schedule.

use std::fmt;
use std::time::Duration;

use crate::schedule::lazy::Lazy;

/// The outcome of feeding one input into a [`Schedule`](crate::Schedule).
///
/// A decision says whether to run again (`cont`), how long to wait first
/// (`delay_nanos`), which state to use for the next step, and what the schedule
/// reports if the sequence stops here.
///
/// Delays are kept as fractional nanoseconds so chains of combinators can scale
/// and add them without rounding at every step. Drivers only truncate to whole
/// milliseconds right before sleeping.
///
/// # Example
///
/// ```rust
/// use cadence::{Decision, Lazy};
/// use std::time::Duration;
///
/// let step = Decision::cont(2_500_000.0, 1u32, Lazy::now("waiting"));
/// assert!(step.cont);
/// assert_eq!(step.delay(), Duration::from_micros(2_500));
///
/// let stopped = !step;
/// assert!(!stopped.cont);
/// assert_eq!(*stopped.output(), "waiting");
/// ```
pub struct Decision<S, O> {
    /// Whether another attempt should be made.
    pub cont: bool,
    /// Delay before the next attempt, in nanoseconds.
    pub delay_nanos: f64,
    /// The schedule's next internal state.
    pub state: S,
    /// The value reported for this step, evaluated on demand.
    pub output: Lazy<O>,
}

impl<S, O> Decision<S, O> {
    /// Create a decision from its parts.
    pub fn new(cont: bool, delay_nanos: f64, state: S, output: Lazy<O>) -> Self {
        Decision {
            cont,
            delay_nanos,
            state,
            output,
        }
    }

    /// A decision to run again after `delay_nanos`.
    pub fn cont(delay_nanos: f64, state: S, output: Lazy<O>) -> Self {
        Decision::new(true, delay_nanos, state, output)
    }

    /// A decision to stop.
    pub fn done(delay_nanos: f64, state: S, output: Lazy<O>) -> Self {
        Decision::new(false, delay_nanos, state, output)
    }

    /// The delay as a `Duration`. Negative or NaN delays map to zero.
    pub fn delay(&self) -> Duration {
        nanos_to_duration(self.delay_nanos)
    }

    /// Force and borrow the output.
    pub fn output(&self) -> &O {
        self.output.force()
    }

    /// Force and take the output.
    pub fn into_output(self) -> O {
        self.output.into_value()
    }

    /// Replace the continue flag.
    pub fn with_cont(self, cont: bool) -> Self {
        Decision { cont, ..self }
    }

    /// Replace the delay.
    pub fn with_delay_nanos(self, delay_nanos: f64) -> Self {
        Decision {
            delay_nanos,
            ..self
        }
    }

    /// Transform the state, keeping flag, delay and output.
    pub fn map_state<S2, F>(self, f: F) -> Decision<S2, O>
    where
        F: FnOnce(S) -> S2,
    {
        Decision {
            cont: self.cont,
            delay_nanos: self.delay_nanos,
            state: f(self.state),
            output: self.output,
        }
    }

    /// Transform the output lazily.
    pub fn map<O2, G>(self, g: G) -> Decision<S, O2>
    where
        O: Send + 'static,
        G: FnOnce(O) -> O2 + Send + 'static,
    {
        Decision {
            cont: self.cont,
            delay_nanos: self.delay_nanos,
            state: self.state,
            output: self.output.map(g),
        }
    }

    /// Transform state and (lazily) output at once.
    pub fn bimap<S2, O2, F, G>(self, f: F, g: G) -> Decision<S2, O2>
    where
        O: Send + 'static,
        F: FnOnce(S) -> S2,
        G: FnOnce(O) -> O2 + Send + 'static,
    {
        Decision {
            cont: self.cont,
            delay_nanos: self.delay_nanos,
            state: f(self.state),
            output: self.output.map(g),
        }
    }

    /// Merge with a decision made by another schedule for the same input.
    ///
    /// The continue flags and delays are merged with the given functions, the
    /// states are paired, and the outputs are zipped without forcing either one.
    /// This is the primitive behind `and`, `or`, `zip` and `pipe`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::{Decision, Lazy};
    ///
    /// let a = Decision::cont(10.0, 'a', Lazy::now(1));
    /// let b = Decision::done(40.0, 'b', Lazy::now(2));
    ///
    /// let both = a.combine(b, |x, y| x && y, f64::max, |x, y| x + y);
    /// assert!(!both.cont);
    /// assert_eq!(both.delay_nanos, 40.0);
    /// assert_eq!(both.state, ('a', 'b'));
    /// assert_eq!(*both.output(), 3);
    /// ```
    pub fn combine<S2, O2, O3, FC, FD, Z>(
        self,
        other: Decision<S2, O2>,
        zip_continue: FC,
        zip_delay: FD,
        zip: Z,
    ) -> Decision<(S, S2), O3>
    where
        O: Send + 'static,
        O2: Send + 'static,
        FC: FnOnce(bool, bool) -> bool,
        FD: FnOnce(f64, f64) -> f64,
        Z: FnOnce(O, O2) -> O3 + Send + 'static,
    {
        Decision {
            cont: zip_continue(self.cont, other.cont),
            delay_nanos: zip_delay(self.delay_nanos, other.delay_nanos),
            state: (self.state, other.state),
            output: self.output.zip(other.output, zip),
        }
    }
}

impl<S, O> std::ops::Not for Decision<S, O> {
    type Output = Decision<S, O>;

    fn not(self) -> Self::Output {
        let cont = !self.cont;
        self.with_cont(cont)
    }
}

impl<S: fmt::Debug, O: fmt::Debug> fmt::Debug for Decision<S, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("cont", &self.cont)
            .field("delay_nanos", &self.delay_nanos)
            .field("state", &self.state)
            .field("output", &self.output)
            .finish()
    }
}

/// Convert fractional nanoseconds to a `Duration`, saturating at both ends.
pub(crate) fn nanos_to_duration(nanos: f64) -> Duration {
    if nanos.is_nan() || nanos <= 0.0 {
        Duration::ZERO
    } else {
        Duration::from_nanos(nanos as u64)
    }
}

pub(crate) fn duration_to_nanos(duration: Duration) -> f64 {
    duration.as_nanos() as f64
}

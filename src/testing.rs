//! Testing utilities for schedules and drivers
//!
//! This module provides the pieces needed to test scheduling code without
//! waiting on a real clock: a manual execution context that records sleeps
//! instead of performing them, helpers that step a schedule by hand, and
//! assertion macros for single decisions.
//!
//! # Examples
//!
//! ## ManualContext
//!
//! ```rust
//! use cadence::prelude::*;
//! use cadence::testing::ManualContext;
//! use cadence::Driver;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let driver = Driver::new().with_context(ManualContext::new());
//! let schedule = exponential(Duration::from_millis(100), 2.0).zip_right(recurs(3));
//!
//! let result = driver.retry(&schedule, || async { Err::<(), _>("down") }).await;
//!
//! assert!(result.is_err());
//! assert_eq!(
//!     driver.context().sleeps(),
//!     vec![
//!         Duration::from_millis(200),
//!         Duration::from_millis(400),
//!         Duration::from_millis(800),
//!     ]
//! );
//! # });
//! ```
//!
//! ## Stepping a schedule
//!
//! ```rust
//! use cadence::prelude::*;
//! use cadence::testing::replay;
//!
//! let steps = replay(&fibonacci(std::time::Duration::from_millis(1)), &(), 5);
//! let delays: Vec<u128> = steps.iter().map(|s| s.delay.as_millis()).collect();
//! assert_eq!(delays, vec![1, 1, 2, 3, 5]);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use crate::retry::{Cancelled, ExecutionContext};
use crate::schedule::Schedule;

/// An execution context that records sleeps instead of performing them.
///
/// Every sleep resolves immediately. The context can be cancelled by hand, or
/// set up to cancel itself after a number of sleeps, which makes cancellation
/// points deterministic.
#[derive(Debug, Default)]
pub struct ManualContext {
    sleeps: Mutex<Vec<Duration>>,
    cancelled: AtomicBool,
    cancel_after: Option<usize>,
}

impl ManualContext {
    /// Create a context that is never cancelled unless asked to.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context that cancels itself once `n` sleeps have been recorded.
    ///
    /// The `n`-th sleep itself completes normally; the driver observes the
    /// cancellation before its next attempt.
    pub fn cancel_after_sleeps(n: usize) -> Self {
        ManualContext {
            cancel_after: Some(n),
            ..Self::default()
        }
    }

    /// Cancel the context.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Every sleep requested so far, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The sum of all recorded sleeps.
    pub fn total_slept(&self) -> Duration {
        self.sleeps().into_iter().sum()
    }
}

impl ExecutionContext for ManualContext {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    fn sleep(
        &self,
        duration: Duration,
    ) -> impl std::future::Future<Output = Result<(), Cancelled>> + Send {
        let result = if self.is_cancelled() {
            Err(Cancelled)
        } else {
            let mut sleeps = self.sleeps.lock().unwrap_or_else(PoisonError::into_inner);
            sleeps.push(duration);
            if self.cancel_after.is_some_and(|n| sleeps.len() >= n) {
                self.cancel();
            }
            Ok(())
        };
        std::future::ready(result)
    }
}

/// One recorded decision, with its output forced.
#[derive(Debug, Clone, PartialEq)]
pub struct Step<O> {
    /// Whether the schedule continued.
    pub cont: bool,
    /// The delay, truncated to whole nanoseconds.
    pub delay: Duration,
    /// The delay as the schedule reported it.
    pub delay_nanos: f64,
    /// The forced output.
    pub output: O,
}

/// Feed every input into `schedule` in order, threading the state, and record
/// each decision.
///
/// Stepping does not stop when the schedule does, so the behaviour of a
/// schedule past its end can be observed too.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::testing::run_steps;
///
/// let steps = run_steps(&recurs(1), ["a", "b", "c"]);
/// let conts: Vec<bool> = steps.iter().map(|s| s.cont).collect();
/// assert_eq!(conts, vec![true, false, false]);
/// ```
pub fn run_steps<S, It>(schedule: &S, inputs: It) -> Vec<Step<S::Output>>
where
    S: Schedule,
    It: IntoIterator<Item = S::Input>,
{
    let mut state = Some(schedule.initial_state());
    let mut steps = Vec::new();

    for input in inputs {
        let Some(current) = state.take() else {
            break;
        };
        let decision = schedule.update(&input, current);
        steps.push(Step {
            cont: decision.cont,
            delay: decision.delay(),
            delay_nanos: decision.delay_nanos,
            output: decision.output.into_value(),
        });
        state = Some(decision.state);
    }

    steps
}

/// Feed the same input into `schedule` up to `n` times, stopping after the
/// first decision that does not continue.
pub fn replay<S>(schedule: &S, input: &S::Input, n: usize) -> Vec<Step<S::Output>>
where
    S: Schedule,
{
    let mut state = schedule.initial_state();
    let mut steps = Vec::with_capacity(n);

    for _ in 0..n {
        let decision = schedule.update(input, state);
        let cont = decision.cont;
        steps.push(Step {
            cont,
            delay: decision.delay(),
            delay_nanos: decision.delay_nanos,
            output: decision.output.into_value(),
        });
        if !cont {
            break;
        }
        state = decision.state;
    }

    steps
}

/// Assert that a decision continues.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::assert_continues;
///
/// let schedule = recurs::<()>(1);
/// assert_continues!(schedule.update(&(), schedule.initial_state()));
/// ```
#[macro_export]
macro_rules! assert_continues {
    ($decision:expr) => {
        match $decision {
            d if d.cont => {}
            d => {
                panic!("Expected the schedule to continue, it stopped after {:?}", d.delay());
            }
        }
    };
}

/// Assert that a decision stops.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::assert_stops;
///
/// let schedule = recurs::<()>(0);
/// assert_stops!(schedule.update(&(), schedule.initial_state()));
/// ```
#[macro_export]
macro_rules! assert_stops {
    ($decision:expr) => {
        match $decision {
            d if !d.cont => {}
            d => {
                panic!("Expected the schedule to stop, it continued after {:?}", d.delay());
            }
        }
    };
}

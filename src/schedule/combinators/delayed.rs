//! Delayed combinator - turns a schedule of durations into real delays.

use std::time::Duration;

use crate::schedule::decision::{duration_to_nanos, nanos_to_duration, Decision};
use crate::schedule::lazy::Lazy;
use crate::schedule::trait_def::Schedule;

/// Delayed combinator - adds each reported duration to the step's delay.
///
/// The wrapped schedule reports how long to wait; that amount is added to
/// whatever delay it already asked for, and the resulting total is reported as
/// the output. `linear`, `exponential` and `fibonacci` are all built this way.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// let schedule = delayed(forever::<()>().map(|n| Duration::from_millis(10 * u64::from(n))));
///
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.delay(), Duration::from_millis(10));
/// let d = schedule.update(&(), d.state);
/// assert_eq!(d.delay(), Duration::from_millis(20));
/// assert_eq!(d.into_output(), Duration::from_millis(20));
/// ```
#[derive(Debug, Clone)]
pub struct Delayed<S> {
    pub(crate) inner: S,
}

impl<S> Schedule for Delayed<S>
where
    S: Schedule<Output = Duration>,
{
    type Input = S::Input;
    type Output = Duration;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Duration> {
        let decision = self.inner.update(input, state);
        let delay = decision.delay_nanos + duration_to_nanos(*decision.output());
        Decision::new(
            decision.cont,
            delay,
            decision.state,
            Lazy::now(nanos_to_duration(delay)),
        )
    }
}

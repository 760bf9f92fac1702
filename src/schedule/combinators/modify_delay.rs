//! Delay-rewriting combinators.
//!
//! [`ModifyDelay`] sees the step's output as well as its delay, so it forces
//! the output. [`MapDelay`] only sees the delay and leaves the output unread;
//! jitter is built on it.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// ModifyDelay combinator - recomputes the delay from the output and the
/// current delay (in nanoseconds).
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// // Wait one extra millisecond per attempt so far.
/// let schedule = forever::<()>()
///     .modify_delay(|count, delay| delay + Duration::from_millis(u64::from(*count)));
///
/// let d = schedule.update(&(), schedule.initial_state());
/// let d = schedule.update(&(), d.state);
/// assert_eq!(d.delay(), Duration::from_millis(2));
/// ```
#[derive(Clone)]
pub struct ModifyDelay<S, F> {
    pub(crate) inner: S,
    pub(crate) f: F,
}

impl<S, F> std::fmt::Debug for ModifyDelay<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifyDelay")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F> Schedule for ModifyDelay<S, F>
where
    S: Schedule,
    F: Fn(&S::Output, f64) -> f64,
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let decision = self.inner.update(input, state);
        let delay = (self.f)(decision.output(), decision.delay_nanos);
        decision.with_delay_nanos(delay)
    }
}

/// MapDelay combinator - recomputes the delay (in nanoseconds) without looking
/// at the output.
#[derive(Clone)]
pub struct MapDelay<S, F> {
    pub(crate) inner: S,
    pub(crate) f: F,
}

impl<S, F> std::fmt::Debug for MapDelay<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapDelay")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F> Schedule for MapDelay<S, F>
where
    S: Schedule,
    F: Fn(f64) -> f64,
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let decision = self.inner.update(input, state);
        let delay = (self.f)(decision.delay_nanos);
        decision.with_delay_nanos(delay)
    }
}

//! Pipe combinator - feeds one schedule's output into another.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Pipe combinator - chains two schedules so the downstream one sees what the
/// upstream one reports.
///
/// Every step runs both. The pipeline continues only while both continue, the
/// delays add up, and the output is the downstream schedule's.
///
/// The upstream output is forced on every step, since the downstream schedule
/// needs it as input.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// // Count steps, and stop once the count reaches 3.
/// let schedule = forever::<()>().pipe(do_while(|n: &u32| *n < 3));
///
/// let d1 = schedule.update(&(), schedule.initial_state());
/// let d2 = schedule.update(&(), d1.state);
/// let d3 = schedule.update(&(), d2.state);
///
/// assert!(d1.cont && d2.cont);
/// assert!(!d3.cont);
/// assert_eq!(d3.into_output(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Pipe<A, B> {
    pub(crate) upstream: A,
    pub(crate) downstream: B,
}

impl<A, B> Schedule for Pipe<A, B>
where
    A: Schedule,
    B: Schedule<Input = A::Output>,
{
    type Input = A::Input;
    type Output = B::Output;
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.upstream.initial_state(), self.downstream.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, B::Output> {
        let (up_state, down_state) = state;
        let first = self.upstream.update(input, up_state);
        let second = self.downstream.update(first.output(), down_state);
        first.combine(second, |a, b| a && b, |a, b| a + b, |_, out| out)
    }
}

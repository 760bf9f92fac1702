//! AndThen combinator - runs one schedule to completion, then another.

use crate::either::Either;
use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// AndThen combinator - sequences two schedules.
///
/// The first schedule drives every step until it decides to stop. The input
/// that stopped it is then handed to the second schedule, starting from a fresh
/// state, and the second schedule drives every step from then on.
///
/// The output is tagged with the side that produced it.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::Either;
/// use std::time::Duration;
///
/// // Two quick retries, then fall back to slow ones.
/// let schedule = recurs::<()>(2)
///     .and_then(spaced(Duration::from_secs(1)));
///
/// let d1 = schedule.update(&(), schedule.initial_state());
/// let d2 = schedule.update(&(), d1.state);
/// let d3 = schedule.update(&(), d2.state);
///
/// assert!(d3.cont);
/// assert_eq!(d3.delay(), Duration::from_secs(1));
/// assert_eq!(d3.into_output(), Either::Right(1));
/// ```
#[derive(Debug, Clone)]
pub struct AndThen<A, B> {
    pub(crate) first: A,
    pub(crate) second: B,
}

impl<A, B> Schedule for AndThen<A, B>
where
    A: Schedule,
    B: Schedule<Input = A::Input>,
{
    type Input = A::Input;
    type Output = Either<A::Output, B::Output>;
    type State = Either<A::State, B::State>;

    fn initial_state(&self) -> Self::State {
        Either::Left(self.first.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        match state {
            Either::Left(first_state) => {
                let decision = self.first.update(input, first_state);
                if decision.cont {
                    decision.bimap(Either::Left, Either::Left)
                } else {
                    self.second
                        .update(input, self.second.initial_state())
                        .bimap(Either::Right, Either::Right)
                }
            }
            Either::Right(second_state) => self
                .second
                .update(input, second_state)
                .bimap(Either::Right, Either::Right),
        }
    }
}

//! Choose combinator - routes each input to one of two schedules.

use crate::either::Either;
use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Choose combinator - dispatches on a tagged input.
///
/// A `Left` input steps the left schedule and a `Right` input steps the right
/// one. The schedule that is not addressed keeps its state untouched.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::Either;
///
/// // Separate budgets for timeouts and for connection resets.
/// let schedule = recurs::<u64>(1).choose(recurs::<String>(3));
///
/// let s = schedule.initial_state();
/// let d = schedule.update(&Either::Left(30), s);
/// assert!(d.cont);
/// let d = schedule.update(&Either::Left(30), d.state);
/// assert!(!d.cont);
///
/// let d = schedule.update(&Either::Right("reset".to_string()), d.state);
/// assert!(d.cont);
/// ```
#[derive(Debug, Clone)]
pub struct Choose<A, B> {
    pub(crate) left: A,
    pub(crate) right: B,
}

impl<A, B> Schedule for Choose<A, B>
where
    A: Schedule,
    B: Schedule,
{
    type Input = Either<A::Input, B::Input>;
    type Output = Either<A::Output, B::Output>;
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.left.initial_state(), self.right.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let (left_state, right_state) = state;
        match input {
            Either::Left(input) => self
                .left
                .update(input, left_state)
                .bimap(move |s| (s, right_state), Either::Left),
            Either::Right(input) => self
                .right
                .update(input, right_state)
                .bimap(move |s| (left_state, s), Either::Right),
        }
    }
}

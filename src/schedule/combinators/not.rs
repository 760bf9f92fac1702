//! Not combinator - inverts the continue flag.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Not combinator - continues exactly when the wrapped schedule would stop.
///
/// Delay, state and output pass through unchanged, so `s.not().not()` makes
/// the same decisions as `s`.
#[derive(Debug, Clone)]
pub struct Not<S> {
    pub(crate) inner: S,
}

impl<S: Schedule> Schedule for Not<S> {
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        !self.inner.update(input, state)
    }
}

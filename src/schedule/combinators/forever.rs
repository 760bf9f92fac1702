//! Forever combinator - restarts a schedule whenever it finishes.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Forever combinator - never stops.
///
/// When the wrapped schedule decides to stop, its state is reset to a fresh
/// initial state and the step continues, keeping the delay and output of the
/// stopping step.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// // 1, 2, 1, 2, ...
/// let schedule = recurs::<()>(2).forever();
///
/// let mut state = schedule.initial_state();
/// let mut outputs = Vec::new();
/// for _ in 0..6 {
///     let d = schedule.update(&(), state);
///     assert!(d.cont);
///     state = d.state;
///     outputs.push(d.into_output());
/// }
/// assert_eq!(outputs, vec![1, 2, 2, 1, 2, 2]);
/// ```
#[derive(Debug, Clone)]
pub struct Forever<S> {
    pub(crate) inner: S,
}

impl<S> Schedule for Forever<S>
where
    S: Schedule,
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let decision = self.inner.update(input, state);
        if decision.cont {
            decision
        } else {
            Decision::cont(
                decision.delay_nanos,
                self.inner.initial_state(),
                decision.output,
            )
        }
    }
}

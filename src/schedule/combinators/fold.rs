//! Fold combinator - accumulates the outputs of a schedule.

use crate::schedule::decision::Decision;
use crate::schedule::lazy::Lazy;
use crate::schedule::trait_def::Schedule;

/// Fold combinator - carries an accumulator next to the wrapped state.
///
/// The accumulator starts from `init()` for every run and absorbs the output of
/// each continuing step. The step that stops leaves it untouched. The
/// accumulator is what the folded schedule reports.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = recurs::<()>(3).fold(0u32, |total, n| total + n);
///
/// let mut state = schedule.initial_state();
/// let mut last = 0;
/// loop {
///     let d = schedule.update(&(), state);
///     let cont = d.cont;
///     state = d.state;
///     last = d.into_output();
///     if !cont {
///         break;
///     }
/// }
/// assert_eq!(last, 1 + 2 + 3);
/// ```
#[derive(Clone)]
pub struct Fold<S, Z, F> {
    pub(crate) inner: S,
    pub(crate) init: Z,
    pub(crate) f: F,
}

impl<S, Z, F> std::fmt::Debug for Fold<S, Z, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fold")
            .field("inner", &"<schedule>")
            .field("init", &"<function>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, Z, F, C> Schedule for Fold<S, Z, F>
where
    S: Schedule,
    Z: Fn() -> C,
    F: Fn(C, S::Output) -> C,
    C: Clone + Send + 'static,
{
    type Input = S::Input;
    type Output = C;
    type State = (S::State, C);

    fn initial_state(&self) -> Self::State {
        (self.inner.initial_state(), (self.init)())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, C> {
        let (inner_state, acc) = state;
        let Decision {
            cont,
            delay_nanos,
            state,
            output,
        } = self.inner.update(input, inner_state);
        let acc = if cont {
            (self.f)(acc, output.into_value())
        } else {
            acc
        };
        Decision::new(cont, delay_nanos, (state, acc.clone()), Lazy::now(acc))
    }
}

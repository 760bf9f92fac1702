//! Unfold - a schedule that steps a seed value forward.

use std::marker::PhantomData;

use crate::schedule::decision::Decision;
use crate::schedule::lazy::Lazy;
use crate::schedule::trait_def::Schedule;

/// A schedule that always continues, without delay, reporting a value that
/// advances by one application of `step` per input.
///
/// The seed comes from `init` at the start of every run and is never reported
/// itself: the first step reports `step(seed)`.
pub struct Unfold<I, Z, F> {
    pub(crate) init: Z,
    pub(crate) step: F,
    pub(crate) _input: PhantomData<fn(&I)>,
}

impl<I, Z, F> Unfold<I, Z, F> {
    pub(crate) fn new(init: Z, step: F) -> Self {
        Unfold {
            init,
            step,
            _input: PhantomData,
        }
    }
}

impl<I, Z: Clone, F: Clone> Clone for Unfold<I, Z, F> {
    fn clone(&self) -> Self {
        Unfold::new(self.init.clone(), self.step.clone())
    }
}

impl<I, Z, F> std::fmt::Debug for Unfold<I, Z, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Unfold")
            .field("init", &"<function>")
            .field("step", &"<function>")
            .finish()
    }
}

impl<I, Z, F, A> Schedule for Unfold<I, Z, F>
where
    Z: Fn() -> A,
    F: Fn(&A) -> A,
    A: Clone + Send + 'static,
{
    type Input = I;
    type Output = A;
    type State = A;

    fn initial_state(&self) -> A {
        (self.init)()
    }

    fn update(&self, _input: &I, state: A) -> Decision<A, A> {
        let next = (self.step)(&state);
        Decision::cont(0.0, next.clone(), Lazy::now(next))
    }
}

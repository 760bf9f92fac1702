//! Identity - the schedule that reports its own input.

use std::marker::PhantomData;

use crate::schedule::decision::Decision;
use crate::schedule::lazy::Lazy;
use crate::schedule::trait_def::Schedule;

/// A schedule that always continues, without delay, reporting its input.
///
/// Zero-cost: stateless, holds nothing but a type marker.
pub struct Identity<I> {
    pub(crate) _input: PhantomData<fn(&I)>,
}

impl<I> Identity<I> {
    pub(crate) fn new() -> Self {
        Identity {
            _input: PhantomData,
        }
    }
}

impl<I> Clone for Identity<I> {
    fn clone(&self) -> Self {
        Identity::new()
    }
}

impl<I> std::fmt::Debug for Identity<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity").finish()
    }
}

impl<I> Schedule for Identity<I>
where
    I: Clone + Send + 'static,
{
    type Input = I;
    type Output = I;
    type State = ();

    fn initial_state(&self) -> Self::State {}

    fn update(&self, input: &I, _state: ()) -> Decision<(), I> {
        Decision::cont(0.0, (), Lazy::now(input.clone()))
    }
}

//! Recurs - a bounded counter.

use std::marker::PhantomData;

use crate::schedule::decision::Decision;
use crate::schedule::lazy::Lazy;
use crate::schedule::trait_def::Schedule;

/// A schedule that continues `n` times, without delay, reporting how many
/// times it has continued so far.
///
/// The step that stops reports the final count, `n`.
pub struct Recurs<I> {
    pub(crate) n: u32,
    pub(crate) _input: PhantomData<fn(&I)>,
}

impl<I> Recurs<I> {
    pub(crate) fn new(n: u32) -> Self {
        Recurs {
            n,
            _input: PhantomData,
        }
    }
}

impl<I> Clone for Recurs<I> {
    fn clone(&self) -> Self {
        Recurs::new(self.n)
    }
}

impl<I> std::fmt::Debug for Recurs<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recurs").field("n", &self.n).finish()
    }
}

impl<I> Schedule for Recurs<I> {
    type Input = I;
    type Output = u32;
    type State = u32;

    fn initial_state(&self) -> u32 {
        0
    }

    fn update(&self, _input: &I, count: u32) -> Decision<u32, u32> {
        if count < self.n {
            Decision::cont(0.0, count + 1, Lazy::now(count + 1))
        } else {
            Decision::done(0.0, count, Lazy::now(count))
        }
    }
}

//! FromFn - a schedule from a pair of plain functions.

use std::marker::PhantomData;

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// A schedule defined directly by its initial state and update functions.
///
/// The escape hatch for policies the combinators cannot express.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::{Decision, Lazy};
///
/// // Continue while inputs keep growing; report the largest seen.
/// let schedule = from_fn(
///     || None::<i32>,
///     |input: &i32, prev: Option<i32>| {
///         let growing = prev.map_or(true, |p| *input > p);
///         Decision::new(growing, 0.0, Some(*input), Lazy::now(*input))
///     },
/// );
///
/// let d = schedule.update(&1, schedule.initial_state());
/// let d = schedule.update(&5, d.state);
/// assert!(d.cont);
/// let d = schedule.update(&3, d.state);
/// assert!(!d.cont);
/// ```
pub struct FromFn<I, Z, U> {
    pub(crate) init: Z,
    pub(crate) update: U,
    pub(crate) _input: PhantomData<fn(&I)>,
}

impl<I, Z, U> FromFn<I, Z, U> {
    pub(crate) fn new(init: Z, update: U) -> Self {
        FromFn {
            init,
            update,
            _input: PhantomData,
        }
    }
}

impl<I, Z: Clone, U: Clone> Clone for FromFn<I, Z, U> {
    fn clone(&self) -> Self {
        FromFn::new(self.init.clone(), self.update.clone())
    }
}

impl<I, Z, U> std::fmt::Debug for FromFn<I, Z, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn")
            .field("init", &"<function>")
            .field("update", &"<function>")
            .finish()
    }
}

impl<I, Z, U, S, O> Schedule for FromFn<I, Z, U>
where
    Z: Fn() -> S,
    U: Fn(&I, S) -> Decision<S, O>,
    S: Send + 'static,
    O: Send + 'static,
{
    type Input = I;
    type Output = O;
    type State = S;

    fn initial_state(&self) -> S {
        (self.init)()
    }

    fn update(&self, input: &I, state: S) -> Decision<S, O> {
        (self.update)(input, state)
    }
}

//! BoxedSchedule - type-erased schedule for opt-in boxing.
//!
//! Use `BoxedSchedule` when you need to:
//! - Store schedules of different shapes in a collection or a struct field
//! - Return different schedules from match arms
//! - Pick a policy at runtime from configuration
//!
//! The hidden state is stored as `Box<dyn Any + Send>` and downcast back on
//! every step. Each boxed schedule only ever sees states it produced itself, so
//! the downcast cannot fail.

use std::any::Any;
use std::sync::Arc;

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

type AnyState = Box<dyn Any + Send>;

trait ErasedSchedule<I, O>: Send + Sync {
    fn initial_state(&self) -> AnyState;
    fn update(&self, input: &I, state: AnyState) -> Decision<AnyState, O>;
}

struct Eraser<S>(S);

impl<S> ErasedSchedule<S::Input, S::Output> for Eraser<S>
where
    S: Schedule + Send + Sync,
{
    fn initial_state(&self) -> AnyState {
        Box::new(self.0.initial_state())
    }

    fn update(&self, input: &S::Input, state: AnyState) -> Decision<AnyState, S::Output> {
        let state = match state.downcast::<S::State>() {
            Ok(state) => *state,
            Err(_) => unreachable!("boxed schedule received a state it did not produce"),
        };
        self.0
            .update(input, state)
            .map_state(|state| Box::new(state) as AnyState)
    }
}

/// A type-erased schedule.
///
/// Cloning is cheap: clones share the underlying schedule.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::BoxedSchedule;
/// use std::time::Duration;
///
/// fn policy(aggressive: bool) -> BoxedSchedule<(), u32> {
///     if aggressive {
///         recurs(10).boxed()
///     } else {
///         recurs(3).zip_left(spaced(Duration::from_secs(1))).boxed()
///     }
/// }
///
/// let schedule = policy(false);
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.delay(), Duration::from_secs(1));
/// assert_eq!(d.into_output(), 1);
/// ```
pub struct BoxedSchedule<I, O> {
    inner: Arc<dyn ErasedSchedule<I, O>>,
}

impl<I, O> BoxedSchedule<I, O> {
    /// Erase the state type of a schedule.
    pub fn new<S>(schedule: S) -> Self
    where
        S: Schedule<Input = I, Output = O> + Send + Sync + 'static,
    {
        BoxedSchedule {
            inner: Arc::new(Eraser(schedule)),
        }
    }
}

impl<I, O> Clone for BoxedSchedule<I, O> {
    fn clone(&self) -> Self {
        BoxedSchedule {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<I, O> std::fmt::Debug for BoxedSchedule<I, O> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedSchedule")
            .field("inner", &"<schedule>")
            .finish()
    }
}

impl<I, O> Schedule for BoxedSchedule<I, O>
where
    O: Send + 'static,
{
    type Input = I;
    type Output = O;
    type State = AnyState;

    fn initial_state(&self) -> AnyState {
        self.inner.initial_state()
    }

    fn update(&self, input: &I, state: AnyState) -> Decision<AnyState, O> {
        self.inner.update(input, state)
    }
}

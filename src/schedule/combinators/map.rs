//! Map combinator - transforms the output of a schedule.

use std::sync::Arc;

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Map combinator - transforms what a schedule reports.
///
/// The continue flag and the delay are untouched, and the transformation only
/// runs when the output is actually read.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = recurs::<()>(3).map(|n| format!("attempt {}", n));
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.into_output(), "attempt 1");
/// ```
pub struct Map<S, F> {
    pub(crate) inner: S,
    pub(crate) f: Arc<F>,
}

impl<S, F> Map<S, F> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Map {
            inner,
            f: Arc::new(f),
        }
    }
}

impl<S: Clone, F> Clone for Map<S, F> {
    fn clone(&self) -> Self {
        Map {
            inner: self.inner.clone(),
            f: Arc::clone(&self.f),
        }
    }
}

impl<S, F> std::fmt::Debug for Map<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F, B> Schedule for Map<S, F>
where
    S: Schedule,
    F: Fn(S::Output) -> B + Send + Sync + 'static,
    B: Send + 'static,
{
    type Input = S::Input;
    type Output = B;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, B> {
        let f = Arc::clone(&self.f);
        self.inner.update(input, state).map(move |output| f(output))
    }
}

//! Contramap combinator - adapts the input a schedule accepts.

use std::marker::PhantomData;

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Contramap combinator - converts each incoming value before the wrapped
/// schedule sees it.
///
/// Useful to reuse an error-inspecting schedule with a richer error type.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// // A schedule over status codes, fed with full responses.
/// let schedule = do_while(|code: &u16| *code == 503).contramap(|resp: &(u16, &str)| resp.0);
///
/// let d = schedule.update(&(503, "busy"), schedule.initial_state());
/// assert!(d.cont);
/// let d = schedule.update(&(200, "ok"), d.state);
/// assert!(!d.cont);
/// ```
pub struct Contramap<S, F, B> {
    pub(crate) inner: S,
    pub(crate) f: F,
    pub(crate) _input: PhantomData<fn(&B)>,
}

impl<S, F, B> Contramap<S, F, B> {
    pub(crate) fn new(inner: S, f: F) -> Self {
        Contramap {
            inner,
            f,
            _input: PhantomData,
        }
    }
}

impl<S: Clone, F: Clone, B> Clone for Contramap<S, F, B> {
    fn clone(&self) -> Self {
        Contramap::new(self.inner.clone(), self.f.clone())
    }
}

impl<S, F, B> std::fmt::Debug for Contramap<S, F, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Contramap")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F, B> Schedule for Contramap<S, F, B>
where
    S: Schedule,
    F: Fn(&B) -> S::Input,
{
    type Input = B;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &B, state: Self::State) -> Decision<Self::State, Self::Output> {
        let adapted = (self.f)(input);
        self.inner.update(&adapted, state)
    }
}

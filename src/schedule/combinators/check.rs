//! Check combinator - stops a schedule early based on its input and output.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Check combinator - lets a predicate veto continuation.
///
/// The predicate only runs when the wrapped schedule wants to continue; a stop
/// from the wrapped schedule is never turned back into a continue.
/// `while_input`, `while_output`, `until_input` and `until_output` are all
/// built on this.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// // Keep going while the count is small and the input is not "done".
/// let schedule = forever::<&str>().check(|input, count| *input != "done" && *count < 10);
///
/// let d = schedule.update(&"work", schedule.initial_state());
/// assert!(d.cont);
/// let d = schedule.update(&"done", d.state);
/// assert!(!d.cont);
/// ```
#[derive(Clone)]
pub struct Check<S, P> {
    pub(crate) inner: S,
    pub(crate) pred: P,
}

impl<S, P> std::fmt::Debug for Check<S, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Check")
            .field("inner", &"<schedule>")
            .field("pred", &"<predicate>")
            .finish()
    }
}

impl<S, P> Schedule for Check<S, P>
where
    S: Schedule,
    P: Fn(&S::Input, &S::Output) -> bool,
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
            let keep_going = (self.pred)(input, decision.output());
            decision.with_cont(keep_going)
        } else {
            decision
        }
    }
}

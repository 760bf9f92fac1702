//! Observation hooks - callbacks on what a schedule sees and reports.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// LogInput combinator - calls a function with every input, after the step.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::sync::{Arc, Mutex};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let schedule = recurs::<i32>(5).log_input({
///     let seen = seen.clone();
///     move |input| seen.lock().unwrap().push(*input)
/// });
///
/// let d = schedule.update(&7, schedule.initial_state());
/// schedule.update(&8, d.state);
/// assert_eq!(*seen.lock().unwrap(), vec![7, 8]);
/// ```
#[derive(Clone)]
pub struct LogInput<S, F> {
    pub(crate) inner: S,
    pub(crate) f: F,
}

impl<S, F> std::fmt::Debug for LogInput<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogInput")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F> Schedule for LogInput<S, F>
where
    S: Schedule,
    F: Fn(&S::Input),
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let decision = self.inner.update(input, state);
        (self.f)(input);
        decision
    }
}

/// LogOutput combinator - calls a function with every output.
///
/// This forces the output of every step.
#[derive(Clone)]
pub struct LogOutput<S, F> {
    pub(crate) inner: S,
    pub(crate) f: F,
}

impl<S, F> std::fmt::Debug for LogOutput<S, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogOutput")
            .field("inner", &"<schedule>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<S, F> Schedule for LogOutput<S, F>
where
    S: Schedule,
    F: Fn(&S::Output),
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let decision = self.inner.update(input, state);
        (self.f)(decision.output());
        decision
    }
}

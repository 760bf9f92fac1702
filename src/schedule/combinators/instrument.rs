//! Tracing support for schedules.
//!
//! This module provides the `Instrument` combinator, which evaluates every step
//! of a schedule inside a tracing span and records the decision it made.

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// A schedule whose steps run inside a tracing span.
///
/// Created by [`ScheduleExt::instrument`](crate::ScheduleExt::instrument).
/// Each step emits a `TRACE` event with the continue flag and the delay.
#[derive(Debug, Clone)]
pub struct Instrument<S> {
    pub(crate) inner: S,
    pub(crate) span: tracing::Span,
}

impl<S> Schedule for Instrument<S>
where
    S: Schedule,
{
    type Input = S::Input;
    type Output = S::Output;
    type State = S::State;

    fn initial_state(&self) -> Self::State {
        self.inner.initial_state()
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let _entered = self.span.enter();
        let decision = self.inner.update(input, state);
        tracing::trace!(
            cont = decision.cont,
            delay_nanos = decision.delay_nanos,
            "schedule decision"
        );
        decision
    }
}

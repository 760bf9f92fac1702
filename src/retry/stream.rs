//! Streaming repeat - every schedule output as a stream item.

use std::future::Future;

use futures::stream::{self, Stream};

use crate::retry::context::ExecutionContext;
use crate::retry::driver::{sleep_duration, Driver, ErrorClassifier};
use crate::retry::error::ScheduleError;
use crate::schedule::{Decision, Schedule};

impl<C: ExecutionContext, K> Driver<C, K> {
    /// Like [`repeat`](Driver::repeat), yielding the output of every step.
    ///
    /// A continuing step's output is yielded after its delay has elapsed. The
    /// stopping step's output is the last item. An error from `op`, a fatal
    /// error or a cancellation is yielded as a final `Err` item.
    ///
    /// The stream is not `Unpin`; pin it (for example with `Box::pin`) before
    /// polling it item by item.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    /// use cadence::Driver;
    /// use futures::StreamExt;
    ///
    /// # tokio_test::block_on(async {
    /// let driver = Driver::new();
    /// let schedule = recurs(3);
    /// let outputs: Vec<_> = driver
    ///     .repeat_stream(&schedule, || async { Ok::<_, String>("ping") })
    ///     .collect()
    ///     .await;
    ///
    /// assert_eq!(outputs, vec![Ok(1), Ok(2), Ok(3), Ok(3)]);
    /// # });
    /// ```
    pub fn repeat_stream<'a, S, E, Op, Fut>(
        &'a self,
        schedule: &'a S,
        op: Op,
    ) -> impl Stream<Item = Result<S::Output, ScheduleError<E>>> + 'a
    where
        S: Schedule,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut + 'a,
        Fut: Future<Output = Result<S::Input, E>> + 'a,
        E: 'a,
    {
        let seed = Some((schedule.initial_state(), op, 0u32));

        stream::unfold(seed, move |slot| async move {
            let Some((state, mut op, attempt)) = slot else {
                return None;
            };

            if self.ensure_active(attempt).is_err() {
                return Some((Err(ScheduleError::Cancelled), None));
            }
            let attempt = attempt.saturating_add(1);

            let value = match op().await {
                Ok(value) => value,
                Err(error) if self.classifier().is_fatal(&error) => {
                    tracing::debug!(attempt, "repeat stream stopped by a fatal error");
                    return Some((Err(ScheduleError::Fatal(error)), None));
                }
                Err(error) => {
                    tracing::debug!(attempt, "repeat stream stopped by an error");
                    return Some((Err(ScheduleError::Failed(error)), None));
                }
            };

            let Decision {
                cont,
                delay_nanos,
                state: next,
                output,
            } = schedule.update(&value, state);

            if !cont {
                tracing::trace!(attempt, "repeat stream finished");
                return Some((Ok(output.into_value()), None));
            }

            if self.pause(sleep_duration(delay_nanos)).await.is_err() {
                return Some((Err(ScheduleError::Cancelled), None));
            }
            Some((Ok(output.into_value()), Some((next, op, attempt))))
        })
    }
}

//! The drivers - loops that run an operation under a schedule.
//!
//! A [`Driver`] owns the two collaborators a loop needs besides the schedule:
//! an [`ExecutionContext`] to sleep and observe cancellation, and an
//! [`ErrorClassifier`] deciding which errors are fatal. Both are configured
//! builder-style; `Driver::new()` uses tokio with no fatal errors.
//!
//! Each run asks the schedule for a fresh state, so one schedule can drive any
//! number of runs. Delays are truncated to whole milliseconds right before
//! sleeping, and zero-length sleeps are skipped.

use std::future::Future;
use std::time::Duration;

use crate::either::Either;
use crate::retry::context::{ExecutionContext, TokioContext};
use crate::retry::error::{Cancelled, ScheduleError};
use crate::schedule::{Decision, Lazy, Schedule};

/// Decides which errors bypass the schedule entirely.
///
/// A fatal error is surfaced immediately as [`ScheduleError::Fatal`]: it is
/// never fed to the schedule and never handed to an `or_else` handler.
pub trait ErrorClassifier<E>: Send + Sync {
    /// Returns true if `error` must not be retried or handled.
    fn is_fatal(&self, error: &E) -> bool;
}

/// The default classifier: no error is fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonFatal;

impl<E> ErrorClassifier<E> for NonFatal {
    fn is_fatal(&self, _error: &E) -> bool {
        false
    }
}

/// A classifier backed by a predicate.
#[derive(Clone)]
pub struct FatalWhen<F>(pub F);

impl<F> std::fmt::Debug for FatalWhen<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("FatalWhen").field(&"<predicate>").finish()
    }
}

impl<E, F> ErrorClassifier<E> for FatalWhen<F>
where
    F: Fn(&E) -> bool + Send + Sync,
{
    fn is_fatal(&self, error: &E) -> bool {
        (self.0)(error)
    }
}

/// Runs operations under schedules.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::{Driver, ScheduleError};
///
/// #[derive(Debug, PartialEq)]
/// enum ApiError {
///     Unavailable,
///     Unauthorized,
/// }
///
/// # tokio_test::block_on(async {
/// let driver = Driver::new().with_fatal(|e: &ApiError| *e == ApiError::Unauthorized);
///
/// let result = driver
///     .retry(&recurs(5), || async { Err::<(), _>(ApiError::Unauthorized) })
///     .await;
/// assert_eq!(result, Err(ScheduleError::Fatal(ApiError::Unauthorized)));
///
/// let result = driver
///     .retry(&recurs(2), || async { Err::<(), _>(ApiError::Unavailable) })
///     .await;
/// assert_eq!(result, Err(ScheduleError::Failed(ApiError::Unavailable)));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct Driver<C = TokioContext, K = NonFatal> {
    context: C,
    classifier: K,
}

impl Driver {
    /// A driver sleeping on tokio, never cancelled, with no fatal errors.
    pub fn new() -> Self {
        Driver {
            context: TokioContext::new(),
            classifier: NonFatal,
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, K> Driver<C, K> {
    /// Use a different execution context.
    pub fn with_context<C2>(self, context: C2) -> Driver<C2, K>
    where
        C2: ExecutionContext,
    {
        Driver {
            context,
            classifier: self.classifier,
        }
    }

    /// Use a different error classifier.
    pub fn with_classifier<K2>(self, classifier: K2) -> Driver<C, K2> {
        Driver {
            context: self.context,
            classifier,
        }
    }

    /// Treat errors matching `is_fatal` as fatal.
    pub fn with_fatal<F>(self, is_fatal: F) -> Driver<C, FatalWhen<F>> {
        self.with_classifier(FatalWhen(is_fatal))
    }

    /// The execution context.
    pub fn context(&self) -> &C {
        &self.context
    }

    /// The error classifier.
    pub fn classifier(&self) -> &K {
        &self.classifier
    }
}

impl<C: ExecutionContext, K> Driver<C, K> {
    /// Run `op` until it fails or the schedule stops, feeding every success
    /// into the schedule.
    ///
    /// Returns the schedule's output from the step that stopped. An error from
    /// `op` ends the run with [`ScheduleError::Failed`].
    pub async fn repeat<S, E, Op, Fut>(
        &self,
        schedule: &S,
        op: Op,
    ) -> Result<S::Output, ScheduleError<E>>
    where
        S: Schedule,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<S::Input, E>>,
    {
        self.repeat_or_else(schedule, op, |error, _| Err(error)).await
    }

    /// Like [`repeat`](Driver::repeat), recovering from an error of `op`.
    ///
    /// `or_else` receives the error and the output of the last continuing step
    /// (`None` if `op` failed on the first attempt). If it returns an error,
    /// that error is surfaced as [`ScheduleError::Failed`].
    pub async fn repeat_or_else<S, E, Op, Fut, H>(
        &self,
        schedule: &S,
        op: Op,
        or_else: H,
    ) -> Result<S::Output, ScheduleError<E>>
    where
        S: Schedule,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<S::Input, E>>,
        H: FnOnce(E, Option<S::Output>) -> Result<S::Output, E>,
    {
        self.repeat_or_else_either(schedule, op, or_else)
            .await
            .map(Either::merge)
    }

    /// Like [`repeat_or_else`](Driver::repeat_or_else), letting the handler
    /// produce a different type. Handler results come back as `Left`, schedule
    /// outputs as `Right`.
    pub async fn repeat_or_else_either<S, E, Op, Fut, H, R>(
        &self,
        schedule: &S,
        mut op: Op,
        or_else: H,
    ) -> Result<Either<R, S::Output>, ScheduleError<E>>
    where
        S: Schedule,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<S::Input, E>>,
        H: FnOnce(E, Option<S::Output>) -> Result<R, E>,
    {
        let mut state = schedule.initial_state();
        let mut last: Option<Lazy<S::Output>> = None;
        let mut attempt: u32 = 0;

        loop {
            self.ensure_active(attempt)?;
            attempt = attempt.saturating_add(1);

            let value = match op().await {
                Ok(value) => value,
                Err(error) => {
                    if self.classifier.is_fatal(&error) {
                        tracing::debug!(attempt, "repeat stopped by a fatal error");
                        return Err(ScheduleError::Fatal(error));
                    }
                    tracing::debug!(attempt, "repeat stopped by an error");
                    return or_else(error, last.map(Lazy::into_value))
                        .map(Either::Left)
                        .map_err(ScheduleError::Failed);
                }
            };

            let Decision {
                cont,
                delay_nanos,
                state: next,
                output,
            } = schedule.update(&value, state);

            if !cont {
                tracing::trace!(attempt, "repeat finished");
                return Ok(Either::Right(output.into_value()));
            }

            let delay = sleep_duration(delay_nanos);
            tracing::trace!(attempt, delay_ms = delay.as_millis() as u64, "repeating");
            self.pause(delay).await?;

            last = Some(output);
            state = next;
        }
    }

    /// Run `op` until it succeeds, feeding every error into the schedule.
    ///
    /// The schedule is never consulted once `op` succeeds. When the schedule
    /// stops, the last error is surfaced as [`ScheduleError::Failed`].
    pub async fn retry<S, E, A, Op, Fut>(&self, schedule: &S, op: Op) -> Result<A, ScheduleError<E>>
    where
        S: Schedule<Input = E>,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<A, E>>,
    {
        self.retry_or_else(schedule, op, |error, _| Err(error)).await
    }

    /// Like [`retry`](Driver::retry), recovering once the schedule gives up.
    ///
    /// `or_else` receives the last error and the schedule's final output. If it
    /// returns an error, that error is surfaced as [`ScheduleError::Failed`].
    pub async fn retry_or_else<S, E, A, Op, Fut, H>(
        &self,
        schedule: &S,
        op: Op,
        or_else: H,
    ) -> Result<A, ScheduleError<E>>
    where
        S: Schedule<Input = E>,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<A, E>>,
        H: FnOnce(E, S::Output) -> Result<A, E>,
    {
        self.retry_or_else_either(schedule, op, or_else)
            .await
            .map(Either::merge)
    }

    /// Like [`retry_or_else`](Driver::retry_or_else), letting the handler
    /// produce a different type. Handler results come back as `Left`,
    /// successes as `Right`.
    pub async fn retry_or_else_either<S, E, A, Op, Fut, H, R>(
        &self,
        schedule: &S,
        mut op: Op,
        or_else: H,
    ) -> Result<Either<R, A>, ScheduleError<E>>
    where
        S: Schedule<Input = E>,
        K: ErrorClassifier<E>,
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<A, E>>,
        H: FnOnce(E, S::Output) -> Result<R, E>,
    {
        let mut state = schedule.initial_state();
        let mut attempt: u32 = 0;

        loop {
            self.ensure_active(attempt)?;
            attempt = attempt.saturating_add(1);

            let error = match op().await {
                Ok(value) => {
                    tracing::trace!(attempt, "attempt succeeded");
                    return Ok(Either::Right(value));
                }
                Err(error) => error,
            };

            if self.classifier.is_fatal(&error) {
                tracing::debug!(attempt, "retry stopped by a fatal error");
                return Err(ScheduleError::Fatal(error));
            }

            let Decision {
                cont,
                delay_nanos,
                state: next,
                output,
            } = schedule.update(&error, state);

            if !cont {
                tracing::debug!(attempt, "retry schedule exhausted");
                return or_else(error, output.into_value())
                    .map(Either::Left)
                    .map_err(ScheduleError::Failed);
            }

            let delay = sleep_duration(delay_nanos);
            tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying after error");
            drop(error);
            self.pause(delay).await?;

            state = next;
        }
    }

    pub(crate) fn ensure_active(&self, attempt: u32) -> Result<(), Cancelled> {
        if self.context.is_cancelled() {
            tracing::debug!(attempt, "run cancelled");
            Err(Cancelled)
        } else {
            Ok(())
        }
    }

    pub(crate) async fn pause(&self, delay: Duration) -> Result<(), Cancelled> {
        if delay.is_zero() {
            Ok(())
        } else {
            self.context.sleep(delay).await
        }
    }
}

/// Whole milliseconds to sleep for a delay given in nanoseconds.
pub(crate) fn sleep_duration(delay_nanos: f64) -> Duration {
    Duration::from_millis((delay_nanos / 1_000_000.0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sleep_duration_truncates_to_millis() {
        assert_eq!(sleep_duration(1_999_999.0), Duration::from_millis(1));
        assert_eq!(sleep_duration(999_999.9), Duration::ZERO);
        assert_eq!(sleep_duration(-3.0), Duration::ZERO);
        assert_eq!(sleep_duration(f64::NAN), Duration::ZERO);
    }

    #[test]
    fn test_classifiers() {
        assert!(!ErrorClassifier::<&str>::is_fatal(&NonFatal, &"anything"));

        let fatal = FatalWhen(|code: &u16| *code == 401);
        assert!(fatal.is_fatal(&401));
        assert!(!fatal.is_fatal(&503));
    }
}

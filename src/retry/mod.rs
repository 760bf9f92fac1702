//! Drivers running operations under schedules.
//!
//! This module is the imperative shell around the pure schedules:
//!
//! - **Schedules decide**: whether to go again, how long to wait, what to report
//! - **Drivers act**: they run the operation, sleep, and observe cancellation
//! - **Errors are data**: every outcome other than a value is a [`ScheduleError`]
//!
//! # Quick Start
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! let mut attempts = 0;
//! let result = retry(&recurs(3), || {
//!     attempts += 1;
//!     let n = attempts;
//!     async move {
//!         if n < 3 {
//!             Err("connection refused")
//!         } else {
//!             Ok("connected")
//!         }
//!     }
//! })
//! .await;
//!
//! assert_eq!(result, Ok("connected"));
//! assert_eq!(attempts, 3);
//! # });
//! ```
//!
//! # Repeat and Retry
//!
//! - [`repeat`]: run while the operation succeeds and the schedule continues;
//!   returns the schedule's final output
//! - [`retry`]: run while the operation fails and the schedule continues;
//!   returns the first success
//!
//! Both have `_or_else` variants taking a fallback handler, and `_or_else_either`
//! variants whose handler may return a different type.
//!
//! # Cancellation and Fatal Errors
//!
//! The free functions use `Driver::new()`. Build a [`Driver`] to supply a
//! cancellation token through [`TokioContext`], a custom [`ExecutionContext`],
//! or an [`ErrorClassifier`] whose fatal errors bypass the schedule.

mod context;
mod driver;
mod error;
mod stream;

pub use context::{ExecutionContext, TokioContext};
pub use driver::{Driver, ErrorClassifier, FatalWhen, NonFatal};
pub use error::{Cancelled, ScheduleError};

use std::future::Future;

use crate::either::Either;
use crate::schedule::Schedule;

/// Run `op` while it succeeds and `schedule` continues, with the default
/// [`Driver`]. See [`Driver::repeat`].
pub async fn repeat<S, E, Op, Fut>(schedule: &S, op: Op) -> Result<S::Output, ScheduleError<E>>
where
    S: Schedule,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<S::Input, E>>,
{
    Driver::new().repeat(schedule, op).await
}

/// See [`Driver::repeat_or_else`].
pub async fn repeat_or_else<S, E, Op, Fut, H>(
    schedule: &S,
    op: Op,
    or_else: H,
) -> Result<S::Output, ScheduleError<E>>
where
    S: Schedule,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<S::Input, E>>,
    H: FnOnce(E, Option<S::Output>) -> Result<S::Output, E>,
{
    Driver::new().repeat_or_else(schedule, op, or_else).await
}

/// See [`Driver::repeat_or_else_either`].
pub async fn repeat_or_else_either<S, E, Op, Fut, H, R>(
    schedule: &S,
    op: Op,
    or_else: H,
) -> Result<Either<R, S::Output>, ScheduleError<E>>
where
    S: Schedule,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<S::Input, E>>,
    H: FnOnce(E, Option<S::Output>) -> Result<R, E>,
{
    Driver::new()
        .repeat_or_else_either(schedule, op, or_else)
        .await
}

/// Run `op` until it succeeds or `schedule` gives up, with the default
/// [`Driver`]. See [`Driver::retry`].
pub async fn retry<S, E, A, Op, Fut>(schedule: &S, op: Op) -> Result<A, ScheduleError<E>>
where
    S: Schedule<Input = E>,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<A, E>>,
{
    Driver::new().retry(schedule, op).await
}

/// See [`Driver::retry_or_else`].
pub async fn retry_or_else<S, E, A, Op, Fut, H>(
    schedule: &S,
    op: Op,
    or_else: H,
) -> Result<A, ScheduleError<E>>
where
    S: Schedule<Input = E>,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<A, E>>,
    H: FnOnce(E, S::Output) -> Result<A, E>,
{
    Driver::new().retry_or_else(schedule, op, or_else).await
}

/// See [`Driver::retry_or_else_either`].
pub async fn retry_or_else_either<S, E, A, Op, Fut, H, R>(
    schedule: &S,
    op: Op,
    or_else: H,
) -> Result<Either<R, A>, ScheduleError<E>>
where
    S: Schedule<Input = E>,
    Op: FnMut() -> Fut,
    Fut: Future<Output = Result<A, E>>,
    H: FnOnce(E, S::Output) -> Result<R, E>,
{
    Driver::new()
        .retry_or_else_either(schedule, op, or_else)
        .await
}

#[cfg(test)]
mod tests;

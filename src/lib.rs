//! # Cadence
//!
//! > *"Decide in pure code, wait in the shell"*
//!
//! A Rust library for composable retry and repeat policies.
//!
//! ## Philosophy
//!
//! **Cadence** separates *when* to run again from *running*:
//! - **Schedules** are pure, reusable state machines. Fed one input at a time,
//!   they decide whether to continue, how long to wait, and what to report.
//! - **Drivers** are the imperative shell. They run an async operation, feed
//!   its results into a schedule, sleep, and observe cancellation.
//!
//! Schedules are small primitives combined into complete strategies with the
//! methods on [`ScheduleExt`]. Combinators return concrete types, so a policy
//! costs no allocation until you ask for a [`BoxedSchedule`].
//!
//! ## Quick Example
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! # tokio_test::block_on(async {
//! // Exponential backoff starting at 10ms, at most 4 retries,
//! // remembering every error seen along the way.
//! let policy = exponential(Duration::from_millis(10), 2.0)
//!     .and(recurs(4))
//!     .zip_right(collect());
//!
//! let mut attempts = 0;
//! let result = retry_or_else(
//!     &policy,
//!     || {
//!         attempts += 1;
//!         let n = attempts;
//!         async move { Err::<u32, _>(format!("attempt {} timed out", n)) }
//!     },
//!     |_last, history| Ok(history.len() as u32),
//! )
//! .await;
//!
//! assert_eq!(attempts, 5);
//! assert_eq!(result, Ok(5));
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`schedule`]: the [`Schedule`] trait, its constructors and combinators
//! - [`retry`]: the [`Driver`], execution contexts and [`ScheduleError`]
//! - [`testing`]: a manual clock and helpers for stepping schedules by hand
//! - [`either`]: the neutral sum type used by `and_then`, `choose` and the
//!   `*_or_else_either` drivers

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod either;
pub mod retry;
pub mod schedule;
pub mod testing;

// Re-exports
pub use either::Either;
pub use retry::{
    repeat, repeat_or_else, repeat_or_else_either, retry, retry_or_else, retry_or_else_either,
    Cancelled, Driver, ErrorClassifier, ExecutionContext, FatalWhen, NonFatal, ScheduleError,
    TokioContext,
};
pub use schedule::{BoxedSchedule, Decision, Lazy, Schedule, ScheduleExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::either::Either;
    pub use crate::retry::{
        repeat, repeat_or_else, repeat_or_else_either, retry, retry_or_else,
        retry_or_else_either, ScheduleError,
    };
    pub use crate::schedule::prelude::*;
}

//! Zero-cost retry and repeat schedules with opt-in boxing.
//!
//! A schedule is a pure, reusable policy: fed one input at a time (a success
//! value when repeating, an error when retrying), it decides whether to go
//! again, how long to wait first, and what to report when the sequence ends.
//! Schedules never sleep and never run anything themselves; the drivers in
//! [`crate::retry`] do that.
//!
//! # Building Policies
//!
//! Small primitives are combined into complete strategies:
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! // Fast exponential backoff while the delay stays under 2s,
//! // then fixed 2s waits, giving up after 10 attempts overall.
//! let schedule = exponential::<std::io::Error>(Duration::from_millis(50), 2.0)
//!     .while_output(|delay| *delay < Duration::from_secs(2))
//!     .and_then(spaced(Duration::from_secs(2)))
//!     .and(recurs(10))
//!     .jittered();
//!
//! // Type: MapDelay<And<AndThen<Check<...>, ...>, Recurs<_>>, ...>
//! // No heap allocation!
//! # let _ = schedule;
//! ```
//!
//! # Reading Decisions
//!
//! Every step yields a [`Decision`]. Its output is lazy: combinators that never
//! look at an output never compute it.
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `cont` | run again? |
//! | `delay_nanos` | how long to wait first, kept fractional |
//! | `state` | the state to pass to the next step |
//! | `output` | what to report, computed on first read |
//!
//! # When to Use Boxing
//!
//! Call `.boxed()` to get a [`BoxedSchedule`] when different branches build
//! differently shaped schedules, or when a schedule is stored in a struct:
//!
//! ```rust
//! use cadence::prelude::*;
//! use std::time::Duration;
//!
//! struct Client {
//!     retry_policy: BoxedSchedule<std::io::Error, u32>,
//! }
//!
//! let client = Client {
//!     retry_policy: recurs(3).zip_left(spaced(Duration::from_millis(10))).boxed(),
//! };
//! # let _ = client.retry_policy;
//! ```

pub mod boxed;
pub mod combinators;
pub mod constructors;
pub mod ext;
pub mod lazy;
pub mod prelude;
mod decision;
mod trait_def;

#[cfg(test)]
mod tests;

// Re-export core trait and step types
pub use decision::Decision;
pub use lazy::Lazy;
pub use trait_def::Schedule;

// Re-export extension trait
pub use ext::ScheduleExt;

// Re-export boxed type
pub use boxed::BoxedSchedule;

// Re-export all combinator types
pub use combinators::{
    And, AndThen, Check, Choose, Combine, Contramap, Delayed, Fold, Forever, FromFn, Identity,
    Instrument, LogInput, LogOutput, Map, MapDelay, ModifyDelay, Not, Or, Pipe, Recurs, Unfold,
    Zip,
};

// Re-export constructors
pub use constructors::{
    collect, delayed, do_until, do_while, exponential, fibonacci, forever, from_fn, identity,
    linear, log_input, log_output, once, recurs, spaced, unfold, unfold_lazy, unit, Count,
};

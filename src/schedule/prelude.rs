//! Prelude module for convenient imports.
//!
//! This module re-exports the traits and constructors needed to build
//! schedules, so a single `use` statement gets started.
//!
//! # Example
//!
//! ```rust
//! use cadence::schedule::prelude::*;
//! use std::time::Duration;
//!
//! let schedule = recurs::<()>(3).and(linear(Duration::from_millis(10)));
//! let d = schedule.update(&(), schedule.initial_state());
//! assert_eq!(d.delay(), Duration::from_millis(10));
//! ```

// Traits
pub use crate::schedule::ext::ScheduleExt;
pub use crate::schedule::trait_def::Schedule;

// Step types
pub use crate::schedule::decision::Decision;
pub use crate::schedule::lazy::Lazy;

// Boxed Schedule
pub use crate::schedule::boxed::BoxedSchedule;

// Constructors
pub use crate::schedule::constructors::{
    collect, delayed, do_until, do_while, exponential, fibonacci, forever, from_fn, identity,
    linear, log_input, log_output, once, recurs, spaced, unfold, unfold_lazy, unit,
};

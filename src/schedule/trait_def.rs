//! Schedule trait definition - the core abstraction of the crate.
//!
//! A schedule is a pure state machine: it produces an initial state, and for
//! every input (a success value when repeating, an error when retrying) it turns
//! the current state into a [`Decision`].
//!
//! # Design Philosophy
//!
//! This trait follows the same pattern as `Iterator`:
//! - Combinators return concrete types (zero-cost abstractions)
//! - The state type is an associated type, so callers only ever name
//!   `impl Schedule<Input = I, Output = O>`
//! - Use `.boxed()` when the state type must be erased entirely
//!
//! Schedules never hold per-run state themselves. Each driver run calls
//! [`initial_state`](Schedule::initial_state) once and threads the state by
//! value, so one schedule value can drive any number of runs, concurrently.

use crate::schedule::decision::Decision;

/// A reusable blueprint deciding whether, and after how long, to run again.
///
/// # Type Parameters
///
/// * `Input` - What the driver feeds in after each attempt
/// * `Output` - What the schedule reports when asked (must be `Send + 'static`)
/// * `State` - The hidden per-run state (must be `Send + 'static`)
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// // Stop after the third input, whatever it is.
/// let schedule = recurs::<&str>(2);
///
/// let s0 = schedule.initial_state();
/// let d1 = schedule.update(&"a", s0);
/// let d2 = schedule.update(&"b", d1.state);
/// let d3 = schedule.update(&"c", d2.state);
///
/// assert!(d1.cont && d2.cont);
/// assert!(!d3.cont);
/// assert_eq!(d3.into_output(), 2);
/// ```
pub trait Schedule {
    /// The value fed into each step.
    type Input;

    /// The value reported by each step.
    type Output: Send + 'static;

    /// The per-run state threaded between steps.
    type State: Send + 'static;

    /// Produce the state for a fresh run.
    fn initial_state(&self) -> Self::State;

    /// Consume the current state and decide on the next step.
    fn update(&self, input: &Self::Input, state: Self::State)
        -> Decision<Self::State, Self::Output>;
}

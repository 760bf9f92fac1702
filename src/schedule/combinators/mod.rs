//! Zero-cost combinator types for schedule composition.
//!
//! This module contains the concrete types returned by the schedule
//! constructors and by the methods on `ScheduleExt`. None of them allocate;
//! each one owns the schedules it wraps and the functions it was given.
//!
//! Most users won't need to name these types directly. Return them behind
//! `impl Schedule<Input = I, Output = O>`, or call `.boxed()` when a single
//! concrete type is needed.

mod and_then;
mod check;
mod choose;
mod combine;
mod contramap;
mod delayed;
mod fold;
mod forever;
mod from_fn;
mod identity;
mod instrument;
mod log;
mod map;
mod modify_delay;
mod not;
mod pipe;
mod recurs;
mod unfold;

pub use and_then::AndThen;
pub use check::Check;
pub use choose::Choose;
pub use combine::{And, Combine, Or, Zip};
pub use contramap::Contramap;
pub use delayed::Delayed;
pub use fold::Fold;
pub use forever::Forever;
pub use from_fn::FromFn;
pub use identity::Identity;
pub use instrument::Instrument;
pub use log::{LogInput, LogOutput};
pub use map::Map;
pub use modify_delay::{MapDelay, ModifyDelay};
pub use not::Not;
pub use pipe::Pipe;
pub use recurs::Recurs;
pub use unfold::Unfold;

//! Constructor functions for creating schedules.
//!
//! These functions are the primitives of the algebra. Everything else is
//! built by combining them with the methods on `ScheduleExt`.
//!
//! The input type of a constructor is usually inferred from the driver or from
//! the schedule it is combined with; spell it out (`recurs::<MyError>(3)`)
//! when it cannot be.

use std::time::Duration;

use crate::schedule::combinators::{
    Delayed, FromFn, Identity, LogInput, LogOutput, Map, Recurs, Unfold,
};
use crate::schedule::decision::{duration_to_nanos, nanos_to_duration, Decision};
use crate::schedule::ext::ScheduleExt;
use crate::schedule::trait_def::Schedule;

/// The schedule returned by [`forever`]: an unbounded step counter.
pub type Count<I> = Unfold<I, fn() -> u32, fn(&u32) -> u32>;

fn zero() -> u32 {
    0
}

fn succ(n: &u32) -> u32 {
    n.saturating_add(1)
}

fn discard<T>(_: T) {}

/// Create a schedule that always continues, without delay, reporting its input.
///
/// Zero-cost: stateless.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = identity::<&str>();
/// let d = schedule.update(&"hello", schedule.initial_state());
/// assert!(d.cont);
/// assert_eq!(d.into_output(), "hello");
/// ```
pub fn identity<I>() -> Identity<I>
where
    I: Clone + Send + 'static,
{
    Identity::new()
}

/// Create a schedule that always continues, without delay, reporting nothing.
pub fn unit<I>() -> Map<Count<I>, fn(u32)> {
    Map::new(forever(), discard::<u32> as fn(u32))
}

/// Create a schedule that reports `step(seed)`, then `step(step(seed))`, and so
/// on, always continuing without delay.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let powers = unfold::<(), _, _>(1u64, |n| n * 2);
/// let d = powers.update(&(), powers.initial_state());
/// assert_eq!(*d.output(), 2);
/// let d = powers.update(&(), d.state);
/// assert_eq!(d.into_output(), 4);
/// ```
pub fn unfold<I, A, F>(
    seed: A,
    step: F,
) -> Unfold<I, impl Fn() -> A + Clone + Send + Sync + 'static, F>
where
    A: Clone + Send + Sync + 'static,
    F: Fn(&A) -> A + Send + Sync + 'static,
{
    Unfold::new(move || seed.clone(), step)
}

/// Like [`unfold`], computing the seed afresh at the start of every run.
pub fn unfold_lazy<I, A, Z, F>(init: Z, step: F) -> Unfold<I, Z, F>
where
    A: Clone + Send + 'static,
    Z: Fn() -> A + Send + Sync + 'static,
    F: Fn(&A) -> A + Send + Sync + 'static,
{
    Unfold::new(init, step)
}

/// Create a schedule that always continues, without delay, reporting how many
/// steps it has taken (starting at 1).
pub fn forever<I>() -> Count<I> {
    Unfold::new(zero as fn() -> u32, succ as fn(&u32) -> u32)
}

/// Create a schedule that continues `n` times, without delay, reporting how
/// many steps it has continued.
///
/// Used with `retry`, the operation runs at most `n + 1` times.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = recurs::<()>(1);
/// let d = schedule.update(&(), schedule.initial_state());
/// assert!(d.cont);
/// let d = schedule.update(&(), d.state);
/// assert!(!d.cont);
/// ```
pub fn recurs<I>(n: u32) -> Recurs<I> {
    Recurs::new(n)
}

/// Create a schedule that continues exactly once.
pub fn once<I>() -> Map<Recurs<I>, fn(u32)> {
    Map::new(recurs(1), discard::<u32> as fn(u32))
}

/// Create a schedule that continues forever with a fixed delay between steps,
/// reporting the step count.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// let schedule = spaced::<()>(Duration::from_millis(500));
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.delay(), Duration::from_millis(500));
/// assert_eq!(d.into_output(), 1);
/// ```
pub fn spaced<I>(interval: Duration) -> impl Schedule<Input = I, Output = u32> + Clone + Send + Sync {
    let interval = duration_to_nanos(interval);
    forever::<I>().map_delay_nanos(move |delay| delay + interval)
}

/// Create a schedule whose delay grows linearly: `n * base` on step `n`.
///
/// Reports the delay.
pub fn linear<I>(base: Duration) -> impl Schedule<Input = I, Output = Duration> + Clone + Send + Sync {
    delayed(forever::<I>().map(move |n| base.saturating_mul(n)))
}

/// Create a schedule whose delay grows exponentially: `base * round(factor^n)`
/// on step `n`, so the first delay is `base * factor`.
///
/// Reports the delay.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// let schedule = exponential::<()>(Duration::from_millis(100), 2.0);
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.delay(), Duration::from_millis(200));
/// let d = schedule.update(&(), d.state);
/// assert_eq!(d.delay(), Duration::from_millis(400));
/// ```
pub fn exponential<I>(
    base: Duration,
    factor: f64,
) -> impl Schedule<Input = I, Output = Duration> + Clone + Send + Sync {
    let base = duration_to_nanos(base);
    delayed(forever::<I>().map(move |n| nanos_to_duration(base * factor.powf(f64::from(n)).round())))
}

/// Create a schedule whose delays follow the Fibonacci sequence scaled by
/// `one`: `one, one, 2 * one, 3 * one, 5 * one, ...`.
///
/// Reports the delay.
pub fn fibonacci<I>(one: Duration) -> impl Schedule<Input = I, Output = Duration> + Clone + Send + Sync {
    delayed(
        unfold::<I, _, _>((Duration::ZERO, one), |&(prev, current): &(Duration, Duration)| {
            (current, prev.saturating_add(current))
        })
        .map(|(delay, _)| delay),
    )
}

/// Turn a schedule that reports durations into one that waits for them.
///
/// See [`Delayed`].
pub fn delayed<S>(schedule: S) -> Delayed<S>
where
    S: Schedule<Output = Duration>,
{
    Delayed { inner: schedule }
}

/// Create a schedule that always continues, collecting every input it sees.
///
/// Inputs must be `Clone`, since each one is copied into the collection. To
/// keep a record of errors that are not `Clone`, collect something derived
/// from them, for example
/// `collect().contramap(|e: &std::io::Error| e.kind())`.
pub fn collect<I>() -> impl Schedule<Input = I, Output = Vec<I>> + Send + Sync
where
    I: Clone + Send + 'static,
{
    identity::<I>().collect()
}

/// Create a schedule that continues while `f` holds for the input, reporting
/// the input.
///
/// Inputs must be `Clone`, because every step reports its input. Error types
/// such as `std::io::Error` are not; for those, use
/// [`forever().while_input(..)`](crate::ScheduleExt::while_input) or
/// [`until_input`](crate::ScheduleExt::until_input) instead.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = do_while(|n: &i32| *n < 3);
/// let d = schedule.update(&2, schedule.initial_state());
/// assert!(d.cont);
/// let d = schedule.update(&3, d.state);
/// assert!(!d.cont);
/// assert_eq!(d.into_output(), 3);
/// ```
pub fn do_while<I, F>(f: F) -> impl Schedule<Input = I, Output = I> + Send + Sync
where
    I: Clone + Send + 'static,
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    identity::<I>().while_input(f)
}

/// Create a schedule that continues until `f` holds for the input, reporting
/// the input.
///
/// Like [`do_while`], this needs `Clone` inputs.
pub fn do_until<I, F>(f: F) -> impl Schedule<Input = I, Output = I> + Send + Sync
where
    I: Clone + Send + 'static,
    F: Fn(&I) -> bool + Send + Sync + 'static,
{
    identity::<I>().until_input(f)
}

/// Create an [`identity`] schedule that calls `f` with every input.
///
/// Needs `Clone` inputs; `forever().log_input(f)` observes any input.
pub fn log_input<I, F>(f: F) -> LogInput<Identity<I>, F>
where
    I: Clone + Send + 'static,
    F: Fn(&I) + Send + Sync + 'static,
{
    identity().log_input(f)
}

/// Create an [`identity`] schedule that calls `f` with every output.
///
/// Needs `Clone` inputs, since the output is the input.
pub fn log_output<I, F>(f: F) -> LogOutput<Identity<I>, F>
where
    I: Clone + Send + 'static,
    F: Fn(&I) + Send + Sync + 'static,
{
    identity().log_output(f)
}

/// Create a schedule from its initial-state and update functions.
///
/// See [`FromFn`].
pub fn from_fn<I, S, O, Z, U>(init: Z, update: U) -> FromFn<I, Z, U>
where
    Z: Fn() -> S + Send + Sync + 'static,
    U: Fn(&I, S) -> Decision<S, O> + Send + Sync + 'static,
    S: Send + 'static,
    O: Send + 'static,
{
    FromFn::new(init, update)
}

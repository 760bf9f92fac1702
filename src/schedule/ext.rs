//! Extension trait providing combinator methods for all Schedules.
//!
//! The `ScheduleExt` trait is automatically implemented for all types that
//! implement `Schedule`. It provides the whole combinator algebra: output and
//! input shaping, continuation control, composition, delay shaping, jitter,
//! accumulation and observation, plus `boxed` for type erasure.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use rand::Rng;

use crate::schedule::boxed::BoxedSchedule;
use crate::schedule::combinators::{
    And, AndThen, Check, Choose, Combine, Contramap, Fold, Forever, Instrument, LogInput,
    LogOutput, Map, MapDelay, ModifyDelay, Not, Or, Pipe, Zip,
};
use crate::schedule::decision::{duration_to_nanos, nanos_to_duration};
use crate::schedule::trait_def::Schedule;

/// Extension trait providing combinator methods for all Schedules.
///
/// This trait is automatically implemented for all types that implement
/// `Schedule`. You don't need to implement this trait yourself.
///
/// Every method consumes `self` and returns a new schedule; nothing is ever
/// mutated in place.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// // Exponential backoff capped at 5 attempts, stopping once the delay
/// // would exceed one second, with the error history collected.
/// let schedule = exponential::<String>(Duration::from_millis(100), 2.0)
///     .while_output(|delay| *delay < Duration::from_secs(1))
///     .and(recurs(5))
///     .zip_right(collect());
///
/// let d = schedule.update(&"timeout".to_string(), schedule.initial_state());
/// assert!(d.cont);
/// assert_eq!(d.delay(), Duration::from_millis(200));
/// assert_eq!(d.into_output(), vec!["timeout".to_string()]);
/// ```
pub trait ScheduleExt: Schedule + Sized {
    /// Transform what the schedule reports.
    fn map<B, F>(self, f: F) -> Map<Self, F>
    where
        F: Fn(Self::Output) -> B + Send + Sync + 'static,
        B: Send + 'static,
    {
        Map::new(self, f)
    }

    /// Discard the output.
    fn void(self) -> Map<Self, impl Fn(Self::Output) + Send + Sync + 'static> {
        Map::new(self, |_| ())
    }

    /// Replace the output with a constant.
    fn constant<B>(self, value: B) -> Map<Self, impl Fn(Self::Output) -> B + Send + Sync + 'static>
    where
        B: Clone + Send + Sync + 'static,
    {
        Map::new(self, move |_| value.clone())
    }

    /// Adapt the input the schedule accepts.
    fn contramap<B, F>(self, f: F) -> Contramap<Self, F, B>
    where
        F: Fn(&B) -> Self::Input + Send + Sync + 'static,
    {
        Contramap::new(self, f)
    }

    /// `contramap` and `map` in one go.
    fn dimap<B, C, F, G>(self, f: F, g: G) -> Map<Contramap<Self, F, B>, G>
    where
        F: Fn(&B) -> Self::Input + Send + Sync + 'static,
        G: Fn(Self::Output) -> C + Send + Sync + 'static,
        C: Send + 'static,
    {
        Map::new(Contramap::new(self, f), g)
    }

    /// Continue only while `pred(input, output)` holds.
    ///
    /// The predicate is only consulted when the schedule itself wants to
    /// continue.
    fn check<P>(self, pred: P) -> Check<Self, P>
    where
        P: Fn(&Self::Input, &Self::Output) -> bool + Send + Sync + 'static,
    {
        Check { inner: self, pred }
    }

    /// Continue exactly when the schedule would stop, and vice versa.
    fn not(self) -> Not<Self> {
        Not { inner: self }
    }

    /// Continue only while the output satisfies `pred`.
    fn while_output<P>(
        self,
        pred: P,
    ) -> Check<Self, impl Fn(&Self::Input, &Self::Output) -> bool + Send + Sync + 'static>
    where
        P: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        self.check(move |_: &Self::Input, output: &Self::Output| pred(output))
    }

    /// Continue only while the input satisfies `pred`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    ///
    /// let schedule = forever::<u16>().while_input(|status| *status == 503);
    /// let d = schedule.update(&503, schedule.initial_state());
    /// assert!(d.cont);
    /// let d = schedule.update(&404, d.state);
    /// assert!(!d.cont);
    /// ```
    fn while_input<P>(
        self,
        pred: P,
    ) -> Check<Self, impl Fn(&Self::Input, &Self::Output) -> bool + Send + Sync + 'static>
    where
        P: Fn(&Self::Input) -> bool + Send + Sync + 'static,
    {
        self.check(move |input: &Self::Input, _: &Self::Output| pred(input))
    }

    /// Stop once the output satisfies `pred`.
    ///
    /// Note that this is the negation of [`while_output`](ScheduleExt::while_output),
    /// so a schedule that stops on its own is turned into one that continues.
    fn until_output<P>(
        self,
        pred: P,
    ) -> Not<Check<Self, impl Fn(&Self::Input, &Self::Output) -> bool + Send + Sync + 'static>>
    where
        P: Fn(&Self::Output) -> bool + Send + Sync + 'static,
    {
        self.while_output(pred).not()
    }

    /// Stop once the input satisfies `pred`.
    ///
    /// The negation of [`while_input`](ScheduleExt::while_input).
    fn until_input<P>(
        self,
        pred: P,
    ) -> Not<Check<Self, impl Fn(&Self::Input, &Self::Output) -> bool + Send + Sync + 'static>>
    where
        P: Fn(&Self::Input) -> bool + Send + Sync + 'static,
    {
        self.while_input(pred).not()
    }

    /// Run alongside `other`, merging the two decisions with custom rules.
    ///
    /// Delays are merged as `Duration`s; see
    /// [`combine_nanos`](ScheduleExt::combine_nanos) for the raw form.
    fn combine<B, FC, FD, Z, C>(
        self,
        other: B,
        zip_continue: FC,
        zip_delay: FD,
        zip: Z,
    ) -> Combine<Self, B, FC, impl Fn(f64, f64) -> f64 + Send + Sync + 'static, Z>
    where
        B: Schedule<Input = Self::Input>,
        FC: Fn(bool, bool) -> bool + Send + Sync + 'static,
        FD: Fn(Duration, Duration) -> Duration + Send + Sync + 'static,
        Z: Fn(Self::Output, B::Output) -> C + Send + Sync + 'static,
        C: Send + 'static,
    {
        let zip_delay = move |a: f64, b: f64| {
            duration_to_nanos(zip_delay(nanos_to_duration(a), nanos_to_duration(b)))
        };
        Combine::new(self, other, zip_continue, zip_delay, zip)
    }

    /// Like [`combine`](ScheduleExt::combine), merging delays as fractional
    /// nanoseconds.
    fn combine_nanos<B, FC, FD, Z, C>(
        self,
        other: B,
        zip_continue: FC,
        zip_delay: FD,
        zip: Z,
    ) -> Combine<Self, B, FC, FD, Z>
    where
        B: Schedule<Input = Self::Input>,
        FC: Fn(bool, bool) -> bool + Send + Sync + 'static,
        FD: Fn(f64, f64) -> f64 + Send + Sync + 'static,
        Z: Fn(Self::Output, B::Output) -> C + Send + Sync + 'static,
        C: Send + 'static,
    {
        Combine::new(self, other, zip_continue, zip_delay, zip)
    }

    /// Continue while both continue, waiting for the longer delay.
    fn and<B>(self, other: B) -> And<Self, B>
    where
        B: Schedule<Input = Self::Input>,
    {
        And {
            left: self,
            right: other,
        }
    }

    /// Continue while either continues, waiting for the shorter delay.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    /// use std::time::Duration;
    ///
    /// let schedule = recurs::<()>(0).or(spaced(Duration::from_millis(50)));
    /// let d = schedule.update(&(), schedule.initial_state());
    /// assert!(d.cont);
    /// assert_eq!(d.delay(), Duration::ZERO);
    /// ```
    fn or<B>(self, other: B) -> Or<Self, B>
    where
        B: Schedule<Input = Self::Input>,
    {
        Or {
            left: self,
            right: other,
        }
    }

    /// Drive this schedule and `other` from paired inputs, pairing the outputs.
    fn zip<B>(
        self,
        other: B,
    ) -> Zip<Self, B, impl Fn(Self::Output, B::Output) -> (Self::Output, B::Output) + Send + Sync + 'static>
    where
        B: Schedule,
    {
        Zip::new(self, other, |a, b| (a, b))
    }

    /// Drive this schedule and `other` from paired inputs, merging the outputs
    /// with `f`.
    fn zip_with<B, Z, C>(self, other: B, f: Z) -> Zip<Self, B, Z>
    where
        B: Schedule,
        Z: Fn(Self::Output, B::Output) -> C + Send + Sync + 'static,
        C: Send + 'static,
    {
        Zip::new(self, other, f)
    }

    /// [`and`](ScheduleExt::and), keeping only this schedule's output.
    fn zip_left<B>(
        self,
        other: B,
    ) -> Map<And<Self, B>, impl Fn((Self::Output, B::Output)) -> Self::Output + Send + Sync + 'static>
    where
        B: Schedule<Input = Self::Input>,
    {
        Map::new(self.and(other), |(a, _)| a)
    }

    /// [`and`](ScheduleExt::and), keeping only `other`'s output.
    fn zip_right<B>(
        self,
        other: B,
    ) -> Map<And<Self, B>, impl Fn((Self::Output, B::Output)) -> B::Output + Send + Sync + 'static>
    where
        B: Schedule<Input = Self::Input>,
    {
        Map::new(self.and(other), |(_, b)| b)
    }

    /// Run this schedule until it stops, then hand over to `other`.
    fn and_then<B>(self, other: B) -> AndThen<Self, B>
    where
        B: Schedule<Input = Self::Input>,
    {
        AndThen {
            first: self,
            second: other,
        }
    }

    /// Feed this schedule's output into `other`.
    fn pipe<B>(self, other: B) -> Pipe<Self, B>
    where
        B: Schedule<Input = Self::Output>,
    {
        Pipe {
            upstream: self,
            downstream: other,
        }
    }

    /// Feed `other`'s output into this schedule. `a.compose(b)` is `b.pipe(a)`.
    fn compose<B>(self, other: B) -> Pipe<B, Self>
    where
        B: Schedule<Output = Self::Input>,
    {
        Pipe {
            upstream: other,
            downstream: self,
        }
    }

    /// Route `Left` inputs to this schedule and `Right` inputs to `other`.
    fn choose<B>(self, other: B) -> Choose<Self, B>
    where
        B: Schedule,
    {
        Choose {
            left: self,
            right: other,
        }
    }

    /// Restart from a fresh state every time the schedule stops.
    fn forever(self) -> Forever<Self> {
        Forever { inner: self }
    }

    /// Recompute the delay from the output and the current delay.
    ///
    /// This forces the output of every step.
    fn modify_delay<F>(
        self,
        f: F,
    ) -> ModifyDelay<Self, impl Fn(&Self::Output, f64) -> f64 + Send + Sync + 'static>
    where
        F: Fn(&Self::Output, Duration) -> Duration + Send + Sync + 'static,
    {
        ModifyDelay {
            inner: self,
            f: move |output: &Self::Output, delay: f64| {
                duration_to_nanos(f(output, nanos_to_duration(delay)))
            },
        }
    }

    /// Recompute the delay, in nanoseconds, from the output and the current delay.
    fn modify_delay_nanos<F>(self, f: F) -> ModifyDelay<Self, F>
    where
        F: Fn(&Self::Output, f64) -> f64 + Send + Sync + 'static,
    {
        ModifyDelay { inner: self, f }
    }

    /// Recompute the delay from the current delay alone.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    /// use std::time::Duration;
    ///
    /// // Never wait more than 250ms.
    /// let schedule = linear::<()>(Duration::from_millis(200))
    ///     .map_delay(|d| d.min(Duration::from_millis(250)));
    ///
    /// let d = schedule.update(&(), schedule.initial_state());
    /// assert_eq!(d.delay(), Duration::from_millis(200));
    /// let d = schedule.update(&(), d.state);
    /// assert_eq!(d.delay(), Duration::from_millis(250));
    /// ```
    fn map_delay<F>(self, f: F) -> MapDelay<Self, impl Fn(f64) -> f64 + Send + Sync + 'static>
    where
        F: Fn(Duration) -> Duration + Send + Sync + 'static,
    {
        MapDelay {
            inner: self,
            f: move |delay: f64| duration_to_nanos(f(nanos_to_duration(delay))),
        }
    }

    /// Recompute the delay, in nanoseconds, from the current delay alone.
    fn map_delay_nanos<F>(self, f: F) -> MapDelay<Self, F>
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        MapDelay { inner: self, f }
    }

    /// Scale every delay by a uniform random factor in `[0, 1)`.
    ///
    /// Jitter only ever shortens a delay.
    fn jittered(self) -> MapDelay<Self, impl Fn(f64) -> f64 + Send + Sync + 'static> {
        self.jittered_with(rand::random::<f64>)
    }

    /// Scale every delay by a factor drawn from `sample`.
    ///
    /// `sample` should return values in `[0, 1)`; anything else is used as is.
    fn jittered_with<G>(self, sample: G) -> MapDelay<Self, impl Fn(f64) -> f64 + Send + Sync + 'static>
    where
        G: Fn() -> f64 + Send + Sync + 'static,
    {
        self.map_delay_nanos(move |delay| delay * sample())
    }

    /// Scale every delay by a uniform factor in `[0, 1)` drawn from `rng`.
    ///
    /// Useful with a seeded generator for reproducible delays.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    /// use rand::{rngs::StdRng, SeedableRng};
    /// use std::time::Duration;
    ///
    /// let schedule = spaced::<()>(Duration::from_secs(1)).jittered_rng(StdRng::seed_from_u64(7));
    /// let d = schedule.update(&(), schedule.initial_state());
    /// assert!(d.delay() < Duration::from_secs(1));
    /// ```
    fn jittered_rng<R>(self, rng: R) -> MapDelay<Self, impl Fn(f64) -> f64 + Send + Sync + 'static>
    where
        R: Rng + Send + 'static,
    {
        let rng = Mutex::new(rng);
        self.jittered_with(move || {
            let mut rng = rng.lock().unwrap_or_else(PoisonError::into_inner);
            rng.random::<f64>()
        })
    }

    /// Accumulate the outputs of continuing steps, starting from `initial`.
    fn fold<C, F>(
        self,
        initial: C,
        f: F,
    ) -> Fold<Self, impl Fn() -> C + Send + Sync + 'static, F>
    where
        C: Clone + Send + Sync + 'static,
        F: Fn(C, Self::Output) -> C + Send + Sync + 'static,
    {
        Fold {
            inner: self,
            init: move || initial.clone(),
            f,
        }
    }

    /// Accumulate the outputs of continuing steps, starting each run from `init()`.
    fn fold_lazy<C, Z, F>(self, init: Z, f: F) -> Fold<Self, Z, F>
    where
        C: Clone + Send + 'static,
        Z: Fn() -> C + Send + Sync + 'static,
        F: Fn(C, Self::Output) -> C + Send + Sync + 'static,
    {
        Fold { inner: self, init, f }
    }

    /// Collect the outputs of continuing steps into a `Vec`.
    fn collect(
        self,
    ) -> Fold<
        Self,
        impl Fn() -> Vec<Self::Output> + Send + Sync + 'static,
        impl Fn(Vec<Self::Output>, Self::Output) -> Vec<Self::Output> + Send + Sync + 'static,
    >
    where
        Self::Output: Clone,
    {
        Fold {
            inner: self,
            init: Vec::new,
            f: |mut acc: Vec<Self::Output>, output: Self::Output| {
                acc.push(output);
                acc
            },
        }
    }

    /// Call `f` with every input.
    fn log_input<F>(self, f: F) -> LogInput<Self, F>
    where
        F: Fn(&Self::Input) + Send + Sync + 'static,
    {
        LogInput { inner: self, f }
    }

    /// Call `f` with every output.
    fn log_output<F>(self, f: F) -> LogOutput<Self, F>
    where
        F: Fn(&Self::Output) + Send + Sync + 'static,
    {
        LogOutput { inner: self, f }
    }

    /// Evaluate every step inside `span`, emitting a trace event per decision.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::prelude::*;
    /// use tracing::debug_span;
    ///
    /// let schedule = recurs::<()>(3).instrument(debug_span!("upload_retry", bucket = "media"));
    /// let d = schedule.update(&(), schedule.initial_state());
    /// assert!(d.cont);
    /// ```
    fn instrument(self, span: tracing::Span) -> Instrument<Self> {
        Instrument { inner: self, span }
    }

    /// Convert to a boxed schedule for type erasure.
    ///
    /// Use this when you need to:
    /// - Store schedules in collections
    /// - Return different schedules from match arms
    fn boxed(self) -> BoxedSchedule<Self::Input, Self::Output>
    where
        Self: Send + Sync + 'static,
    {
        BoxedSchedule::new(self)
    }
}

// Blanket implementation for all Schedule types
impl<S: Schedule> ScheduleExt for S {}

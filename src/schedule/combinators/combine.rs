//! Combination combinators - run two schedules side by side on the same step.
//!
//! All of them are built on [`Decision::combine`]: the two decisions for one
//! step are merged flag-by-flag and delay-by-delay, states are paired, and
//! outputs are zipped lazily.
//!
//! | Combinator | Continue | Delay | Input |
//! |------------|----------|-------|-------|
//! | [`And`]    | both     | `max` | shared |
//! | [`Or`]     | either   | `min` | shared |
//! | [`Zip`]    | both     | `max` | paired `(A, B)` |
//! | [`Combine`] | custom  | custom | shared |

use std::sync::Arc;

use crate::schedule::decision::Decision;
use crate::schedule::trait_def::Schedule;

/// Combine combinator - merges two schedules with caller-supplied rules.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// // Continue while both do, but wait for the sum of both delays.
/// let schedule = spaced::<()>(Duration::from_millis(10)).combine(
///     spaced::<()>(Duration::from_millis(5)),
///     |a, b| a && b,
///     |a, b| a + b,
///     |a, b| a.max(b),
/// );
///
/// let d = schedule.update(&(), schedule.initial_state());
/// assert_eq!(d.delay(), Duration::from_millis(15));
/// ```
pub struct Combine<A, B, FC, FD, Z> {
    pub(crate) left: A,
    pub(crate) right: B,
    pub(crate) zip_continue: FC,
    pub(crate) zip_delay: FD,
    pub(crate) zip: Arc<Z>,
}

impl<A, B, FC, FD, Z> Combine<A, B, FC, FD, Z> {
    pub(crate) fn new(left: A, right: B, zip_continue: FC, zip_delay: FD, zip: Z) -> Self {
        Combine {
            left,
            right,
            zip_continue,
            zip_delay,
            zip: Arc::new(zip),
        }
    }
}

impl<A, B, FC, FD, Z> std::fmt::Debug for Combine<A, B, FC, FD, Z> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Combine")
            .field("left", &"<schedule>")
            .field("right", &"<schedule>")
            .field("zip_continue", &"<function>")
            .field("zip_delay", &"<function>")
            .field("zip", &"<function>")
            .finish()
    }
}

impl<A, B, FC, FD, Z, C> Schedule for Combine<A, B, FC, FD, Z>
where
    A: Schedule,
    B: Schedule<Input = A::Input>,
    FC: Fn(bool, bool) -> bool,
    FD: Fn(f64, f64) -> f64,
    Z: Fn(A::Output, B::Output) -> C + Send + Sync + 'static,
    C: Send + 'static,
{
    type Input = A::Input;
    type Output = C;
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.left.initial_state(), self.right.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, C> {
        let (left_state, right_state) = state;
        let zip = Arc::clone(&self.zip);
        self.left.update(input, left_state).combine(
            self.right.update(input, right_state),
            &self.zip_continue,
            &self.zip_delay,
            move |a, b| zip(a, b),
        )
    }
}

/// And combinator - continues only while both schedules continue, waiting for
/// the longer of the two delays.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use std::time::Duration;
///
/// // At most 3 retries, 100ms apart.
/// let schedule = recurs::<()>(3).and(spaced(Duration::from_millis(100)));
///
/// let d = schedule.update(&(), schedule.initial_state());
/// assert!(d.cont);
/// assert_eq!(d.delay(), Duration::from_millis(100));
/// assert_eq!(d.into_output(), (1, 1));
/// ```
#[derive(Debug, Clone)]
pub struct And<A, B> {
    pub(crate) left: A,
    pub(crate) right: B,
}

impl<A, B> Schedule for And<A, B>
where
    A: Schedule,
    B: Schedule<Input = A::Input>,
{
    type Input = A::Input;
    type Output = (A::Output, B::Output);
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.left.initial_state(), self.right.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let (left_state, right_state) = state;
        self.left.update(input, left_state).combine(
            self.right.update(input, right_state),
            |a, b| a && b,
            f64::max,
            |a, b| (a, b),
        )
    }
}

/// Or combinator - continues while either schedule continues, waiting for the
/// shorter of the two delays.
#[derive(Debug, Clone)]
pub struct Or<A, B> {
    pub(crate) left: A,
    pub(crate) right: B,
}

impl<A, B> Schedule for Or<A, B>
where
    A: Schedule,
    B: Schedule<Input = A::Input>,
{
    type Input = A::Input;
    type Output = (A::Output, B::Output);
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.left.initial_state(), self.right.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, Self::Output> {
        let (left_state, right_state) = state;
        self.left.update(input, left_state).combine(
            self.right.update(input, right_state),
            |a, b| a || b,
            f64::min,
            |a, b| (a, b),
        )
    }
}

/// Zip combinator - drives two schedules from paired inputs.
///
/// Each schedule sees its own half of the input tuple. Continuation and delay
/// follow the [`And`] rules; the outputs are merged with the zip function.
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
///
/// let schedule = do_while(|n: &u32| *n < 5).zip_with(recurs::<char>(10), |n, count| n + count);
///
/// let d = schedule.update(&(2, 'x'), schedule.initial_state());
/// assert!(d.cont);
/// assert_eq!(d.into_output(), 3);
/// ```
pub struct Zip<A, B, Z> {
    pub(crate) left: A,
    pub(crate) right: B,
    pub(crate) zip: Arc<Z>,
}

impl<A, B, Z> Zip<A, B, Z> {
    pub(crate) fn new(left: A, right: B, zip: Z) -> Self {
        Zip {
            left,
            right,
            zip: Arc::new(zip),
        }
    }
}

impl<A, B, Z> std::fmt::Debug for Zip<A, B, Z> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Zip")
            .field("left", &"<schedule>")
            .field("right", &"<schedule>")
            .field("zip", &"<function>")
            .finish()
    }
}

impl<A, B, Z, C> Schedule for Zip<A, B, Z>
where
    A: Schedule,
    B: Schedule,
    Z: Fn(A::Output, B::Output) -> C + Send + Sync + 'static,
    C: Send + 'static,
{
    type Input = (A::Input, B::Input);
    type Output = C;
    type State = (A::State, B::State);

    fn initial_state(&self) -> Self::State {
        (self.left.initial_state(), self.right.initial_state())
    }

    fn update(&self, input: &Self::Input, state: Self::State) -> Decision<Self::State, C> {
        let (left_input, right_input) = input;
        let (left_state, right_state) = state;
        let zip = Arc::clone(&self.zip);
        self.left.update(left_input, left_state).combine(
            self.right.update(right_input, right_state),
            |a, b| a && b,
            f64::max,
            move |a, b| zip(a, b),
        )
    }
}

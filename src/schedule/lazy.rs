//! Deferred, memoized values.
//!
//! Every [`Decision`](crate::Decision) carries its output as a [`Lazy`] so that
//! combinators which never read an output (an `and` whose result is discarded,
//! a `pipe` that only keeps the downstream side) never pay for computing it.

use std::cell::{Cell, OnceCell};
use std::fmt;

type Thunk<T> = Box<dyn FnOnce() -> T + Send>;

/// A value computed on first access and cached afterwards.
///
/// Forcing a `Lazy` twice returns the same value; the thunk runs at most once.
/// If the thunk panics the value is poisoned and every later access panics too.
///
/// # Example
///
/// ```rust
/// use cadence::Lazy;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicU32::new(0));
/// let lazy = Lazy::later({
///     let calls = calls.clone();
///     move || {
///         calls.fetch_add(1, Ordering::SeqCst);
///         vec![1, 2, 3]
///     }
/// });
///
/// assert!(!lazy.is_evaluated());
/// assert_eq!(lazy.force().len(), 3);
/// assert_eq!(lazy.force().len(), 3);
/// assert_eq!(calls.load(Ordering::SeqCst), 1);
/// ```
pub struct Lazy<T> {
    value: OnceCell<T>,
    thunk: Cell<Option<Thunk<T>>>,
}

impl<T> Lazy<T> {
    /// Wrap an already computed value.
    pub fn now(value: T) -> Self {
        Lazy {
            value: OnceCell::from(value),
            thunk: Cell::new(None),
        }
    }

    /// Defer a computation until the value is first read.
    pub fn later<F>(f: F) -> Self
    where
        F: FnOnce() -> T + Send + 'static,
    {
        Lazy {
            value: OnceCell::new(),
            thunk: Cell::new(Some(Box::new(f))),
        }
    }

    /// Evaluate (if needed) and borrow the value.
    ///
    /// # Panics
    ///
    /// Panics if a previous evaluation panicked.
    pub fn force(&self) -> &T {
        self.value.get_or_init(|| match self.thunk.take() {
            Some(thunk) => thunk(),
            None => panic!("lazy value poisoned: its initializer panicked"),
        })
    }

    /// Returns `true` once the value has been computed.
    pub fn is_evaluated(&self) -> bool {
        self.value.get().is_some()
    }

    /// Evaluate (if needed) and take ownership of the value.
    pub fn into_value(self) -> T {
        let Lazy { value, thunk } = self;
        match value.into_inner() {
            Some(v) => v,
            None => match thunk.into_inner() {
                Some(thunk) => thunk(),
                None => panic!("lazy value poisoned: its initializer panicked"),
            },
        }
    }

    /// Defer a transformation of the value.
    ///
    /// Neither this value nor the transformation is evaluated until the result is read.
    pub fn map<U, F>(self, f: F) -> Lazy<U>
    where
        T: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        Lazy::later(move || f(self.into_value()))
    }

    /// Defer combining two lazy values.
    pub fn zip<U, R, F>(self, other: Lazy<U>, f: F) -> Lazy<R>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: FnOnce(T, U) -> R + Send + 'static,
    {
        Lazy::later(move || f(self.into_value(), other.into_value()))
    }
}

impl<T: fmt::Debug> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value.get() {
            Some(v) => f.debug_tuple("Lazy").field(v).finish(),
            None => f.write_str("Lazy(<unevaluated>)"),
        }
    }
}

impl<T> From<T> for Lazy<T> {
    fn from(value: T) -> Self {
        Lazy::now(value)
    }
}

//! A neutral sum type used to tag which side of a composed schedule produced a value.
//!
//! Schedules built with [`and_then`](crate::ScheduleExt::and_then) report whether the
//! first or the second schedule made the decision, and [`choose`](crate::ScheduleExt::choose)
//! routes tagged inputs to one of two schedules. Both use `Either` for this.
//! The `*_or_else_either` drivers also use it to separate a fallback result from a
//! schedule output.
//!
//! Unlike `Result`, neither variant implies failure.
//!
//! # Examples
//!
//! ```rust
//! use cadence::Either;
//!
//! let phase: Either<u32, &str> = Either::left(3);
//! let description = phase.fold(
//!     |attempts| format!("fast phase, attempt {}", attempts),
//!     |label| format!("slow phase: {}", label),
//! );
//! assert_eq!(description, "fast phase, attempt 3");
//! ```

/// A value that is either `Left(L)` or `Right(R)`.
///
/// By convention `Either` is right-biased: [`map`](Either::map) operates on `Right`.
///
/// # Example
///
/// ```rust
/// use cadence::Either;
///
/// let left: Either<i32, &str> = Either::left(42);
/// let right: Either<i32, &str> = Either::right("hello");
///
/// assert!(left.is_left());
/// assert_eq!(right.into_right(), Some("hello"));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Either<L, R> {
    /// The left variant
    Left(L),
    /// The right variant
    Right(R),
}

impl<L, R> Either<L, R> {
    /// Create a Left value.
    #[inline]
    pub fn left(value: L) -> Self {
        Either::Left(value)
    }

    /// Create a Right value.
    #[inline]
    pub fn right(value: R) -> Self {
        Either::Right(value)
    }

    /// Returns `true` if this is a `Left` value.
    #[inline]
    pub fn is_left(&self) -> bool {
        matches!(self, Either::Left(_))
    }

    /// Returns `true` if this is a `Right` value.
    #[inline]
    pub fn is_right(&self) -> bool {
        matches!(self, Either::Right(_))
    }

    /// Returns the left value if present, consuming self.
    #[inline]
    pub fn into_left(self) -> Option<L> {
        match self {
            Either::Left(l) => Some(l),
            Either::Right(_) => None,
        }
    }

    /// Returns the right value if present, consuming self.
    #[inline]
    pub fn into_right(self) -> Option<R> {
        match self {
            Either::Left(_) => None,
            Either::Right(r) => Some(r),
        }
    }

    /// Converts from `&Either<L, R>` to `Either<&L, &R>`.
    #[inline]
    pub fn as_ref(&self) -> Either<&L, &R> {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the left value, leaving a right value untouched.
    #[inline]
    pub fn map_left<L2, F>(self, f: F) -> Either<L2, R>
    where
        F: FnOnce(L) -> L2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(r),
        }
    }

    /// Transform the right value, leaving a left value untouched.
    #[inline]
    pub fn map<R2, F>(self, f: F) -> Either<L, R2>
    where
        F: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(l),
            Either::Right(r) => Either::Right(f(r)),
        }
    }

    /// Transform whichever side is present.
    #[inline]
    pub fn bimap<L2, R2, F, G>(self, f: F, g: G) -> Either<L2, R2>
    where
        F: FnOnce(L) -> L2,
        G: FnOnce(R) -> R2,
    {
        match self {
            Either::Left(l) => Either::Left(f(l)),
            Either::Right(r) => Either::Right(g(r)),
        }
    }

    /// Collapse both sides into a single value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::Either;
    ///
    /// let e: Either<u32, u32> = Either::right(7);
    /// assert_eq!(e.fold(|l| l * 10, |r| r + 1), 8);
    /// ```
    #[inline]
    pub fn fold<T, F, G>(self, left_fn: F, right_fn: G) -> T
    where
        F: FnOnce(L) -> T,
        G: FnOnce(R) -> T,
    {
        match self {
            Either::Left(l) => left_fn(l),
            Either::Right(r) => right_fn(r),
        }
    }

    /// Convert to a `Result`, treating `Left` as the error side.
    #[inline]
    pub fn into_result(self) -> Result<R, L> {
        match self {
            Either::Left(l) => Err(l),
            Either::Right(r) => Ok(r),
        }
    }
}

impl<T> Either<T, T> {
    /// Extract the value when both sides carry the same type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cadence::Either;
    ///
    /// let fallback: Either<i32, i32> = Either::left(-1);
    /// assert_eq!(fallback.merge(), -1);
    /// ```
    #[inline]
    pub fn merge(self) -> T {
        match self {
            Either::Left(t) | Either::Right(t) => t,
        }
    }
}

impl<L, R> From<Result<R, L>> for Either<L, R> {
    fn from(result: Result<R, L>) -> Self {
        match result {
            Ok(r) => Either::Right(r),
            Err(l) => Either::Left(l),
        }
    }
}

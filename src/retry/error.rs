//! Error types for schedule-driven operations.

/// Error returned when a repeated or retried operation does not produce a value.
///
/// # Examples
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::ScheduleError;
///
/// # tokio_test::block_on(async {
/// let result = retry(&recurs(2), || async { Err::<(), _>("always fails") }).await;
///
/// match result {
///     Err(ScheduleError::Failed(error)) => assert_eq!(error, "always fails"),
///     other => panic!("Expected exhaustion, got {:?}", other),
/// }
/// # });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError<E> {
    /// The schedule gave up, or the fallback handler returned this error.
    Failed(E),
    /// The error was classified as fatal; the schedule was never consulted.
    Fatal(E),
    /// The execution context was cancelled between or during attempts.
    Cancelled,
}

impl<E> ScheduleError<E> {
    /// Returns true if the schedule gave up on this error.
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Returns true if this error bypassed the schedule as fatal.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Returns true if the run was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    /// Get a reference to the operation's error, if there is one.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Failed(e) | Self::Fatal(e) => Some(e),
            Self::Cancelled => None,
        }
    }

    /// Extract the operation's error, if there is one.
    pub fn into_inner(self) -> Option<E> {
        match self {
            Self::Failed(e) | Self::Fatal(e) => Some(e),
            Self::Cancelled => None,
        }
    }

    /// Transform the operation's error, keeping the variant.
    pub fn map<E2, F>(self, f: F) -> ScheduleError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Self::Failed(e) => ScheduleError::Failed(f(e)),
            Self::Fatal(e) => ScheduleError::Fatal(f(e)),
            Self::Cancelled => ScheduleError::Cancelled,
        }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for ScheduleError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(e) => write!(f, "schedule exhausted: {}", e),
            Self::Fatal(e) => write!(f, "fatal error: {}", e),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for ScheduleError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Failed(e) | Self::Fatal(e) => Some(e),
            Self::Cancelled => None,
        }
    }
}

impl<E> From<Cancelled> for ScheduleError<E> {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

/// Error returned by an [`ExecutionContext`](crate::ExecutionContext) whose
/// cancellation fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cancelled")
    }
}

impl std::error::Error for Cancelled {}

#[cfg(test)]
mod error_tests {
    use super::*;
    use std::error::Error;

    #[derive(Debug)]
    struct Io;

    impl std::fmt::Display for Io {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "connection reset")
        }
    }

    impl Error for Io {}

    #[test]
    fn test_schedule_error_display() {
        let failed = ScheduleError::Failed("connection failed");
        assert_eq!(format!("{}", failed), "schedule exhausted: connection failed");

        let fatal = ScheduleError::Fatal("bad credentials");
        assert!(format!("{}", fatal).contains("fatal"));

        let cancelled: ScheduleError<&str> = ScheduleError::Cancelled;
        assert_eq!(format!("{}", cancelled), "cancelled");
    }

    #[test]
    fn test_schedule_error_predicates() {
        let failed = ScheduleError::Failed(1);
        assert!(failed.is_failed());
        assert!(!failed.is_fatal());
        assert!(!failed.is_cancelled());

        let cancelled: ScheduleError<i32> = ScheduleError::Cancelled;
        assert!(cancelled.is_cancelled());
        assert_eq!(cancelled.error(), None);
    }

    #[test]
    fn test_schedule_error_into_inner() {
        assert_eq!(ScheduleError::Fatal("x").into_inner(), Some("x"));
        assert_eq!(ScheduleError::<&str>::Cancelled.into_inner(), None);
    }

    #[test]
    fn test_schedule_error_map_keeps_variant() {
        let mapped = ScheduleError::Fatal(2).map(|n| n * 10);
        assert_eq!(mapped, ScheduleError::Fatal(20));
    }

    #[test]
    fn test_schedule_error_source() {
        let err = ScheduleError::Failed(Io);
        assert_eq!(err.source().map(|e| e.to_string()), Some("connection reset".to_string()));

        let cancelled: ScheduleError<Io> = ScheduleError::Cancelled;
        assert!(cancelled.source().is_none());
    }

    #[test]
    fn test_cancelled_converts() {
        let err: ScheduleError<String> = Cancelled.into();
        assert!(err.is_cancelled());
    }
}

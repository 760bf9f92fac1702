//! Execution contexts - where drivers sleep and learn about cancellation.
//!
//! Drivers never call a timer directly. They ask their [`ExecutionContext`] to
//! sleep between attempts and check it for cancellation before every attempt,
//! which keeps the loop testable with a manual clock (see
//! [`ManualContext`](crate::testing::ManualContext)).

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::retry::error::Cancelled;

/// Supplier of sleeping and cancellation for the drivers.
pub trait ExecutionContext: Send + Sync {
    /// Returns true once the surrounding work has been cancelled.
    fn is_cancelled(&self) -> bool;

    /// Sleep for `duration`, resolving early with [`Cancelled`] if the context
    /// is cancelled in the meantime.
    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Cancelled>> + Send;
}

impl<C: ExecutionContext> ExecutionContext for &C {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Cancelled>> + Send {
        (**self).sleep(duration)
    }
}

impl<C: ExecutionContext> ExecutionContext for Arc<C> {
    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = Result<(), Cancelled>> + Send {
        (**self).sleep(duration)
    }
}

/// The default context: `tokio::time::sleep`, raced against a
/// [`CancellationToken`].
///
/// # Example
///
/// ```rust
/// use cadence::prelude::*;
/// use cadence::{Driver, ScheduleError, TokioContext};
/// use tokio_util::sync::CancellationToken;
///
/// # tokio_test::block_on(async {
/// let token = CancellationToken::new();
/// let driver = Driver::new().with_context(TokioContext::with_token(token.clone()));
///
/// token.cancel();
/// let result = driver.retry(&forever(), || async { Err::<(), _>("down") }).await;
/// assert_eq!(result, Err(ScheduleError::Cancelled));
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct TokioContext {
    token: CancellationToken,
}

impl TokioContext {
    /// Create a context with a fresh token that nothing else can cancel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context observing an existing token.
    pub fn with_token(token: CancellationToken) -> Self {
        TokioContext { token }
    }

    /// The token this context observes.
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the token, stopping every driver run using this context.
    pub fn cancel(&self) {
        self.token.cancel();
    }
}

impl ExecutionContext for TokioContext {
    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    async fn sleep(&self, duration: Duration) -> Result<(), Cancelled> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

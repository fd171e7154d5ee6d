//! Bounded waiting for async operations.

use std::fmt;
use std::future::Future;
use std::time::Duration;

/// The operation did not complete within its time limit.
///
/// The underlying future is dropped, not cancelled upstream; whatever work it
/// started may still run to completion elsewhere with its result discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimedOut {
    /// The limit the operation was raced against.
    pub limit: Duration,
}

impl fmt::Display for TimedOut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation timed out after {}ms", self.limit.as_millis())
    }
}

impl std::error::Error for TimedOut {}

/// Race a future against a timer; first to finish wins.
pub async fn with_timeout<F, T>(limit: Duration, operation: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(value) => Ok(value),
        Err(_) => Err(TimedOut { limit }),
    }
}

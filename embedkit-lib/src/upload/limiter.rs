//! Concurrency limiting for simultaneous transfers.

use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Limits the number of concurrent transfers.
///
/// Wraps a `tokio::sync::Semaphore` with owned permits, since transfer
/// tasks carry their permit across a spawn boundary. The default limit is
/// 4, a small bound that keeps a browser-like connection pool happy.
///
/// # Example
///
/// ```
/// use embedkit_lib::TransferLimiter;
///
/// let limiter = TransferLimiter::new(3);
/// assert_eq!(limiter.limit(), 3);
/// assert_eq!(limiter.available(), 3);
/// ```
#[derive(Clone)]
pub struct TransferLimiter {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

impl TransferLimiter {
    /// Creates a new limiter with the specified limit.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Acquires a permit, waiting if necessary.
    ///
    /// The permit is released when dropped.
    pub async fn acquire(&self) -> OwnedSemaphorePermit {
        self.semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("semaphore should not be closed")
    }

    /// Returns the configured limit.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Returns the number of available permits.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

impl Default for TransferLimiter {
    fn default() -> Self {
        Self::new(4)
    }
}

//! Process-wide bound on simultaneous outbound model calls.

use crate::ports::model_client::GatewayError;
use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting semaphore shared by every call a [`CouncilContext`] issues.
///
/// A permit is held for the whole retry loop of one call, backoff sleeps
/// included, so the cap bounds in-flight *logical* calls.
///
/// [`CouncilContext`]: crate::dispatch::CouncilContext
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyGate {
    /// A gate admitting at most `capacity` calls at once (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }

    /// Wait for a permit; fails once the gate has been closed.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, GatewayError> {
        Arc::clone(&self.semaphore)
            .acquire_owned()
            .await
            .map_err(|_| GatewayError::GateClosed)
    }

    /// Reject all waiting and future acquisitions. Permits already held stay valid.
    pub fn close(&self) {
        self.semaphore.close();
    }

    pub fn is_closed(&self) -> bool {
        self.semaphore.is_closed()
    }
}

//! Dispatch machinery shared by every stage.
//!
//! - [`ConcurrencyGate`] — process-wide cap on in-flight calls
//! - [`RetryPolicy`] — exponential backoff with jitter for transient failures
//! - [`CouncilContext`] — client + gate + retry, constructed once and passed explicitly
//! - [`dispatch_all`] — order-preserving fan-out that never fails the batch

pub mod context;
pub mod gate;
pub mod parallel;
pub mod retry;

pub use context::CouncilContext;
pub use gate::ConcurrencyGate;
pub use parallel::{DispatchResult, dispatch_all};
pub use retry::RetryPolicy;

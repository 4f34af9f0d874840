//! Application-level configuration.
//!
//! - [`CouncilLimits`] — context windows, concurrency cap, timeouts, retry policy

pub mod limits;

pub use limits::CouncilLimits;

//! Application layer for llm-council
//!
//! This crate contains use cases, port definitions, dispatch machinery and
//! application configuration. It depends only on the domain layer.

pub mod config;
pub mod dispatch;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::CouncilLimits;
pub use dispatch::{ConcurrencyGate, CouncilContext, DispatchResult, RetryPolicy, dispatch_all};
pub use ports::model_client::{GatewayError, ModelClient};
pub use use_cases::generate_title::{FALLBACK_TITLE, GenerateTitleUseCase, clean_title};
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};

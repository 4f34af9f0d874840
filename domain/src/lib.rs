//! Domain layer for llm-council
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Council
//!
//! A council answers one query in three stages:
//!
//! - **Stage 1**: every member answers independently
//! - **Stage 2**: every member ranks the anonymized answers ("Response A", ...)
//! - **Stage 3**: the chairman synthesizes a final answer from both
//!
//! Parsing judges' rankings ([`parse_ranking`]) and averaging them
//! ([`aggregate_rankings`]) are pure functions here; all I/O lives in the
//! application and infrastructure layers.

pub mod config;
pub mod core;
pub mod council;
pub mod history;
pub mod prompt;
pub mod session;

// Re-export commonly used types
pub use config::{ConfigIssue, ConfigIssueCode, OutputFormat, Severity};
pub use core::{backend::BackendId, error::DomainError};
pub use council::{
    AggregateEntry, AnonymizedAnswer, CouncilConfig, CouncilEvent, CouncilOutcome, Label,
    LabelToBackend, MAX_COUNCIL_MEMBERS, PipelineMetadata, RANKING_MARKER, Stage1Result,
    Stage2Result, Stage3Result, TitlePayload, aggregate_rankings, anonymize, parse_ranking,
};
pub use history::{ContextBuilder, HistoryTurn};
pub use prompt::PromptTemplate;
pub use session::entities::{ChatMessage, Completion, Role};

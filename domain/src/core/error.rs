//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No council members configured")]
    NoCouncilMembers,

    #[error("Council has {0} members; at most {max} are supported", max = crate::council::config::MAX_COUNCIL_MEMBERS)]
    TooManyMembers(usize),

    #[error("Invalid backend id: {0:?}")]
    InvalidBackend(String),

    #[error("Query cannot be empty")]
    EmptyQuery,
}

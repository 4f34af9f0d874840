//! Core domain concepts shared across all subdomains.
//!
//! - [`backend::BackendId`] — opaque name of an LLM backend
//! - [`error::DomainError`] — domain-level errors

pub mod backend;
pub mod error;
pub mod string;

//! Chat message domain.
//!
//! - [`entities::ChatMessage`] — a single role-tagged message sent to a backend
//! - [`entities::Completion`] — the text a backend returned for one call

pub mod entities;

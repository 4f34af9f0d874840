//! Conversation history as seen by the council.
//!
//! History is read-only input: the council never appends to it. The storage
//! collaborator owns persistence and hands the turns in on each request.
//!
//! - [`HistoryTurn`] — one prior user or assistant turn
//! - [`context_builder::ContextBuilder`] — condenses recent turns into a bounded prompt

pub mod context_builder;

use crate::session::entities::Role;
use serde::{Deserialize, Serialize};

pub use context_builder::ContextBuilder;

/// A prior turn of the conversation.
///
/// Assistant turns carry only the chairman's final answer; intermediate
/// Stage 1 and Stage 2 output is never fed back into later prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum HistoryTurn {
    User {
        content: String,
    },
    Assistant {
        /// Final synthesized text; `None` when the turn never produced one.
        #[serde(default)]
        final_answer: Option<String>,
    },
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        HistoryTurn::User {
            content: content.into(),
        }
    }

    pub fn assistant(final_answer: impl Into<String>) -> Self {
        HistoryTurn::Assistant {
            final_answer: Some(final_answer.into()),
        }
    }

    /// An assistant turn that has no synthesized text (e.g. an interrupted run).
    pub fn assistant_without_answer() -> Self {
        HistoryTurn::Assistant { final_answer: None }
    }

    pub fn role(&self) -> Role {
        match self {
            HistoryTurn::User { .. } => Role::User,
            HistoryTurn::Assistant { .. } => Role::Assistant,
        }
    }

    /// Text this turn contributes to a prompt, if any.
    pub fn prompt_text(&self) -> Option<&str> {
        match self {
            HistoryTurn::User { content } => Some(content),
            HistoryTurn::Assistant { final_answer } => final_answer.as_deref(),
        }
    }
}

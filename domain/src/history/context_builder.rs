//! Bounded condensation of conversation history.
//!
//! [`ContextBuilder`] keeps the prompt size bounded no matter how long the
//! conversation grows:
//!
//! 1. take the last `max_turns` turns (the window is applied *before*
//!    filtering, so dropped turns still count against it)
//! 2. keep user turns verbatim
//! 3. reduce assistant turns to their final synthesized text
//! 4. drop assistant turns that have no such text entirely
//!
//! Stage 1 uses it as chat messages ([`ContextBuilder::build`]); Stage 3 uses
//! it as a plain transcript ([`ContextBuilder::transcript`]).

use super::HistoryTurn;
use crate::session::entities::ChatMessage;

/// Default window for the Stage 1 chat context.
pub const DEFAULT_MAX_CONTEXT_TURNS: usize = 8;

/// Default window for the chairman's history summary.
pub const DEFAULT_MAX_SUMMARY_TURNS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextBuilder {
    max_turns: usize,
}

impl ContextBuilder {
    pub fn new(max_turns: usize) -> Self {
        Self { max_turns }
    }

    /// Builder sized for Stage 1 context.
    pub fn for_context() -> Self {
        Self::new(DEFAULT_MAX_CONTEXT_TURNS)
    }

    /// Builder sized for the Stage 3 history summary.
    pub fn for_summary() -> Self {
        Self::new(DEFAULT_MAX_SUMMARY_TURNS)
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    fn window<'a>(&self, history: &'a [HistoryTurn]) -> &'a [HistoryTurn] {
        let start = history.len().saturating_sub(self.max_turns);
        &history[start..]
    }

    /// Condense recent history into chat messages.
    pub fn condense(&self, history: &[HistoryTurn]) -> Vec<ChatMessage> {
        self.window(history)
            .iter()
            .filter_map(|turn| {
                turn.prompt_text().map(|text| ChatMessage {
                    role: turn.role(),
                    content: text.to_string(),
                })
            })
            .collect()
    }

    /// Condensed history followed by the new user query.
    pub fn build(&self, history: &[HistoryTurn], query: &str) -> Vec<ChatMessage> {
        let mut messages = self.condense(history);
        messages.push(ChatMessage::user(query));
        messages
    }

    /// Condensed history rendered as `Role: text` paragraphs.
    pub fn transcript(&self, history: &[HistoryTurn]) -> String {
        self.condense(history)
            .iter()
            .map(|m| format!("{}: {}", m.role.display_name(), m.content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ContextBuilder {
    fn default() -> Self {
        Self::for_context()
    }
}

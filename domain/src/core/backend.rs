//! Backend identifier value object

use serde::{Deserialize, Serialize};

/// Default council members consulted in Stage 1.
pub const DEFAULT_COUNCIL: [&str; 4] = [
    "openai/gpt-5.1",
    "google/gemini-3-pro-preview",
    "anthropic/claude-sonnet-4.5",
    "x-ai/grok-4",
];

/// Default chairman performing the Stage 3 synthesis.
pub const DEFAULT_CHAIRMAN: &str = "google/gemini-3-pro-preview";

/// Default fast model used for conversation titles.
pub const DEFAULT_TITLE_MODEL: &str = "google/gemini-2.5-flash";

/// Opaque name of an LLM backend (Value Object)
///
/// The string is passed through to the provider untouched
/// (e.g. `"anthropic/claude-sonnet-4.5"`); the council never interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BackendId(String);

impl BackendId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// The default council roster, in configuration order.
    pub fn default_council() -> Vec<BackendId> {
        DEFAULT_COUNCIL.iter().map(|s| BackendId::new(*s)).collect()
    }

    pub fn default_chairman() -> BackendId {
        BackendId::new(DEFAULT_CHAIRMAN)
    }

    pub fn default_title_model() -> BackendId {
        BackendId::new(DEFAULT_TITLE_MODEL)
    }
}

impl std::fmt::Display for BackendId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BackendId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(BackendId::new(s))
    }
}

impl From<&str> for BackendId {
    fn from(s: &str) -> Self {
        BackendId::new(s)
    }
}

impl From<String> for BackendId {
    fn from(s: String) -> Self {
        BackendId(s)
    }
}

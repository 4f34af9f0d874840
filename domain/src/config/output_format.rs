//! Output format value object

use serde::{Deserialize, Serialize};

/// Output format for council results
///
/// This is a domain concept representing how the output should be formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the chairman's synthesis (default)
    #[default]
    Synthesis,
    /// All three stages plus aggregate rankings
    Full,
    /// The complete outcome as one JSON document
    Json,
    /// One JSON event per line, emitted as stages finish
    Events,
}

impl OutputFormat {
    /// Whether the run should go through the streaming variant.
    pub fn is_streaming(&self) -> bool {
        matches!(self, OutputFormat::Events)
    }
}

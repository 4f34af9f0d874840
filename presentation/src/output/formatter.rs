//! Output formatter trait

use council_domain::{CouncilEvent, CouncilOutcome, OutputFormat};

/// Trait for formatting council results
pub trait OutputFormatter {
    /// Format all three stages and the aggregate rankings
    fn format(&self, query: &str, outcome: &CouncilOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &CouncilOutcome) -> String;

    /// Format synthesis only (concise output)
    fn format_synthesis_only(&self, outcome: &CouncilOutcome) -> String;

    /// Format a single streaming event as one line
    fn format_event(&self, event: &CouncilEvent) -> String;

    /// Dispatch on an [`OutputFormat`]. Event output is written while the
    /// run is in progress, so it has nothing left to print at the end.
    fn render(&self, format: OutputFormat, query: &str, outcome: &CouncilOutcome) -> Option<String> {
        match format {
            OutputFormat::Synthesis => Some(self.format_synthesis_only(outcome)),
            OutputFormat::Full => Some(self.format(query, outcome)),
            OutputFormat::Json => Some(self.format_json(outcome)),
            OutputFormat::Events => None,
        }
    }
}

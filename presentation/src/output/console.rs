//! Console output formatter for council results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_domain::{CouncilEvent, CouncilOutcome};

/// Formats council results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete outcome
    pub fn format(query: &str, outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("LLM Council Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), query));

        // Stage 1: Individual answers
        output.push_str(&Self::section_header("Stage 1: Individual Responses"));
        if outcome.stage1.is_empty() {
            output.push_str(&format!("\n{}\n", "No council member responded.".red()));
        }
        for result in &outcome.stage1 {
            output.push_str(&format!(
                "\n{}\n{}\n",
                format!("── {} ──", result.backend).yellow().bold(),
                result.response
            ));
        }

        // Stage 2: Peer rankings (skipped when nobody answered)
        if !outcome.stage2.is_empty() {
            output.push_str(&Self::section_header("Stage 2: Peer Rankings"));
            for result in &outcome.stage2 {
                output.push_str(&format!(
                    "\n{}\n{}\n",
                    format!("── {} ──", result.judge).yellow().bold(),
                    result.raw_text
                ));
                if !result.parsed_labels.is_empty() {
                    output.push_str(&format!(
                        "{} {}\n",
                        "Parsed:".dimmed(),
                        Self::deanonymize(outcome, &result.parsed_labels)
                    ));
                }
            }
        }

        if !outcome.metadata.aggregate_rankings.is_empty() {
            output.push_str(&format!("\n{}\n", "Aggregate Rankings:".green().bold()));
            for (i, entry) in outcome.metadata.aggregate_rankings.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} (avg {:.2}, {} votes)\n",
                    i + 1,
                    entry.backend,
                    entry.average_rank,
                    entry.mention_count
                ));
            }
        }

        // Stage 3: Synthesis
        output.push_str(&Self::section_header("Stage 3: Final Synthesis"));
        output.push_str(&format!(
            "\n{}\n\n{}\n",
            format!("Chairman: {}", outcome.stage3.chairman).yellow().bold(),
            outcome.stage3.response
        ));

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &CouncilOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format synthesis only (concise output)
    pub fn format_synthesis_only(outcome: &CouncilOutcome) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "{}\n\n",
            "=== LLM Council Conclusion ===".cyan().bold()
        ));

        if !outcome.stage1.is_empty() {
            let members: Vec<&str> = outcome.stage1.iter().map(|r| r.backend.as_str()).collect();
            output.push_str(&format!(
                "{} {}\n\n",
                "Models consulted:".dimmed(),
                members.join(", ")
            ));
        }

        output.push_str(outcome.final_answer());
        output.push('\n');

        output
    }

    /// One compact JSON object per event
    pub fn format_event(event: &CouncilEvent) -> String {
        serde_json::to_string(event).unwrap_or_else(|_| format!("{{\"type\":\"{}\"}}", event.kind()))
    }

    /// Replace label tags with `Label (backend)` for display.
    fn deanonymize(outcome: &CouncilOutcome, labels: &[String]) -> String {
        labels
            .iter()
            .map(|tag| match outcome.metadata.label_to_backend.resolve(tag) {
                Some(backend) => format!("{} ({})", tag, backend),
                None => tag.clone(),
            })
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, query: &str, outcome: &CouncilOutcome) -> String {
        Self::format(query, outcome)
    }

    fn format_json(&self, outcome: &CouncilOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_synthesis_only(&self, outcome: &CouncilOutcome) -> String {
        Self::format_synthesis_only(outcome)
    }

    fn format_event(&self, event: &CouncilEvent) -> String {
        Self::format_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{
        AggregateEntry, BackendId, LabelToBackend, OutputFormat, PipelineMetadata, Stage1Result,
        Stage2Result, Stage3Result,
    };

    fn outcome() -> CouncilOutcome {
        colored::control::set_override(false);
        CouncilOutcome {
            stage1: vec![
                Stage1Result::new("a/one", "Answer one"),
                Stage1Result::new("b/two", "Answer two"),
            ],
            stage2: vec![Stage2Result::new(
                "a/one",
                "FINAL RANKING:\n1. Response B\n2. Response A",
                vec!["Response B".into(), "Response A".into()],
            )],
            stage3: Stage3Result::new("b/two", "The synthesis"),
            metadata: PipelineMetadata::new(
                LabelToBackend::from([("Response A", "a/one"), ("Response B", "b/two")]),
                vec![
                    AggregateEntry {
                        backend: BackendId::new("b/two"),
                        average_rank: 1.0,
                        mention_count: 1,
                    },
                    AggregateEntry {
                        backend: BackendId::new("a/one"),
                        average_rank: 2.0,
                        mention_count: 1,
                    },
                ],
            ),
        }
    }

    #[test]
    fn test_synthesis_only() {
        let text = ConsoleFormatter::format_synthesis_only(&outcome());
        assert!(text.contains("Models consulted: a/one, b/two"));
        assert!(text.trim_end().ends_with("The synthesis"));
        assert!(!text.contains("Answer one"));
    }

    #[test]
    fn test_full_output_shows_every_stage() {
        let text = ConsoleFormatter::format("Why?", &outcome());
        assert!(text.contains("Question: Why?"));
        assert!(text.contains("Answer one"));
        assert!(text.contains("Parsed: Response B (b/two) > Response A (a/one)"));
        assert!(text.contains("1. b/two (avg 1.00, 1 votes)"));
        assert!(text.contains("Chairman: b/two"));
    }

    #[test]
    fn test_full_output_after_total_failure() {
        let text = ConsoleFormatter::format("Why?", &CouncilOutcome::all_failed());
        assert!(text.contains("No council member responded."));
        assert!(!text.contains("Stage 2"));
        assert!(text.contains("All models failed to respond"));
    }

    #[test]
    fn test_json_round_trips() {
        let json = ConsoleFormatter::format_json(&outcome());
        let parsed: CouncilOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, outcome());
    }

    #[test]
    fn test_event_line_is_single_line() {
        let line = ConsoleFormatter::format_event(&CouncilEvent::title("Rust errors"));
        assert!(!line.contains('\n'));
        assert!(line.contains("\"type\":\"title_complete\""));
    }

    #[test]
    fn test_render_events_prints_nothing_at_end() {
        let formatter = ConsoleFormatter;
        assert!(formatter.render(OutputFormat::Events, "q", &outcome()).is_none());
        assert!(formatter.render(OutputFormat::Json, "q", &outcome()).is_some());
    }
}

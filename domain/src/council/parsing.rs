//! Ranking extraction for Stage 2.
//!
//! Judges are asked to finish with a `FINAL RANKING:` line followed by a
//! numbered list (`1. Response C`). Models do not always comply, so
//! [`parse_ranking`] degrades through weaker heuristics instead of failing:
//!
//! | Step | Region                         | Pattern                     |
//! |------|--------------------------------|-----------------------------|
//! | 1    | after the marker, else all text| (none)                      |
//! | 2    | region                         | `<n>. Response <Letter>`    |
//! | 3    | region                         | any `Response <Letter>`     |
//!
//! When the marker is present but the region after it has no labels, the
//! result is empty; the text before the marker is never consulted. A
//! malformed reply only ever yields a shorter (possibly empty) list.

use regex::Regex;
use std::sync::LazyLock;

/// Literal line a judge must emit before its ranked list.
pub const RANKING_MARKER: &str = "FINAL RANKING:";

static NUMBERED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+\.\s*(Response [A-Z])").expect("numbered entry pattern is valid")
});

static LABEL_MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Response [A-Z]").expect("label pattern is valid"));

/// Extract the ordered label tags (`"Response C"`, ...) from a judge reply.
pub fn parse_ranking(text: &str) -> Vec<String> {
    let region = ranking_region(text);

    let numbered: Vec<String> = NUMBERED_ENTRY
        .captures_iter(region)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();
    if !numbered.is_empty() {
        return numbered;
    }

    LABEL_MENTION
        .find_iter(region)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Text between the first marker and the next one (or the end); the whole
/// text when no marker is present.
fn ranking_region(text: &str) -> &str {
    text.split(RANKING_MARKER).nth(1).unwrap_or(text)
}

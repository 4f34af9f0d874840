//! Rank aggregation across judges.

use crate::core::backend::BackendId;
use crate::council::label::LabelToBackend;
use crate::council::value_objects::{AggregateEntry, Stage2Result};

/// Compute each backend's average position across all judges.
///
/// Positions are 1-based within each judge's parsed list. Tags that do not
/// resolve through `labels` are skipped. Repeated mentions by the same judge
/// each contribute a position. Backends nobody mentioned are omitted.
///
/// The result is sorted ascending by average; ties keep the order in which
/// backends were first encountered while walking the judges.
pub fn aggregate_rankings(stage2: &[Stage2Result], labels: &LabelToBackend) -> Vec<AggregateEntry> {
    // First-seen order is preserved by pushing into a Vec rather than a map.
    let mut positions: Vec<(BackendId, Vec<usize>)> = Vec::new();

    for result in stage2 {
        for (index, tag) in result.parsed_labels.iter().enumerate() {
            let Some(backend) = labels.resolve(tag) else {
                continue;
            };
            match positions.iter_mut().find(|(b, _)| b == backend) {
                Some((_, list)) => list.push(index + 1),
                None => positions.push((backend.clone(), vec![index + 1])),
            }
        }
    }

    let mut entries: Vec<AggregateEntry> = positions
        .into_iter()
        .map(|(backend, list)| {
            let mean = list.iter().sum::<usize>() as f64 / list.len() as f64;
            AggregateEntry {
                backend,
                average_rank: round2(mean),
                mention_count: list.len(),
            }
        })
        .collect();

    entries.sort_by(|a, b| a.average_rank.total_cmp(&b.average_rank));
    entries
}

/// Round to 2 decimals, exact halves going to the even neighbour.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

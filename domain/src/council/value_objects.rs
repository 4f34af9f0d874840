//! Council value objects - immutable result types for one deliberation.
//!
//! These types represent the outputs of each stage:
//! - [`Stage1Result`] - one backend's independent answer
//! - [`Stage2Result`] - one judge's raw ranking and the labels parsed from it
//! - [`Stage3Result`] - the chairman's synthesis
//! - [`PipelineMetadata`] - label mapping and aggregate rankings
//! - [`CouncilOutcome`] - everything above, returned by a full run
//!
//! Field names on the wire follow the JSON shape transports already expect
//! (`model`, `response`, `parsed_ranking`, ...).

use crate::core::backend::BackendId;
use crate::council::label::LabelToBackend;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Backend id reported when Stage 1 produced nothing.
pub const ERROR_BACKEND: &str = "error";

/// Placeholder answer when every council member failed Stage 1.
pub const ALL_MODELS_FAILED: &str = "All models failed to respond. Please try again.";

/// Placeholder answer when the chairman call failed.
pub const SYNTHESIS_FAILED: &str = "Error: Unable to generate final synthesis.";

/// Independent answer from a single council member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage1Result {
    #[serde(rename = "model")]
    pub backend: BackendId,
    pub response: String,
}

impl Stage1Result {
    pub fn new(backend: impl Into<BackendId>, response: impl Into<String>) -> Self {
        Self {
            backend: backend.into(),
            response: response.into(),
        }
    }
}

/// A judge's ranking reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage2Result {
    #[serde(rename = "model")]
    pub judge: BackendId,
    /// Raw reply text, kept verbatim for the chairman
    #[serde(rename = "ranking")]
    pub raw_text: String,
    /// Label tags in the judge's preference order
    #[serde(rename = "parsed_ranking")]
    pub parsed_labels: Vec<String>,
}

impl Stage2Result {
    pub fn new(
        judge: impl Into<BackendId>,
        raw_text: impl Into<String>,
        parsed_labels: Vec<String>,
    ) -> Self {
        Self {
            judge: judge.into(),
            raw_text: raw_text.into(),
            parsed_labels,
        }
    }
}

/// The chairman's final answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage3Result {
    #[serde(rename = "model")]
    pub chairman: BackendId,
    pub response: String,
}

impl Stage3Result {
    pub fn new(chairman: impl Into<BackendId>, response: impl Into<String>) -> Self {
        Self {
            chairman: chairman.into(),
            response: response.into(),
        }
    }

    /// Error-shaped result for a run in which no council member answered.
    pub fn all_failed() -> Self {
        Self::new(ERROR_BACKEND, ALL_MODELS_FAILED)
    }

    /// Degraded result when the chairman itself could not answer.
    pub fn synthesis_failed(chairman: impl Into<BackendId>) -> Self {
        Self::new(chairman, SYNTHESIS_FAILED)
    }

    pub fn is_all_failed(&self) -> bool {
        self.chairman.as_str() == ERROR_BACKEND && self.response == ALL_MODELS_FAILED
    }
}

/// Average position a backend received across judges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateEntry {
    #[serde(rename = "model")]
    pub backend: BackendId,
    /// Mean 1-based position, rounded to 2 decimals (lower is better)
    pub average_rank: f64,
    /// Number of positions that contributed to the average
    #[serde(rename = "rankings_count")]
    pub mention_count: usize,
}

/// Bookkeeping produced alongside Stage 2
///
/// Serializes with both keys whenever Stage 2 ran, and as `{}` only for
/// the all-failed terminal state where both parts are empty.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PipelineMetadata {
    #[serde(rename = "label_to_model", default)]
    pub label_to_backend: LabelToBackend,
    #[serde(default)]
    pub aggregate_rankings: Vec<AggregateEntry>,
}

impl Serialize for PipelineMetadata {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_empty() {
            return serializer.serialize_map(Some(0))?.end();
        }
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("label_to_model", &self.label_to_backend)?;
        map.serialize_entry("aggregate_rankings", &self.aggregate_rankings)?;
        map.end()
    }
}

impl PipelineMetadata {
    pub fn new(label_to_backend: LabelToBackend, aggregate_rankings: Vec<AggregateEntry>) -> Self {
        Self {
            label_to_backend,
            aggregate_rankings,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.label_to_backend.is_empty() && self.aggregate_rankings.is_empty()
    }
}

/// Complete result of a council run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilOutcome {
    pub stage1: Vec<Stage1Result>,
    pub stage2: Vec<Stage2Result>,
    pub stage3: Stage3Result,
    pub metadata: PipelineMetadata,
}

impl CouncilOutcome {
    /// Terminal outcome when Stage 1 produced no answers.
    pub fn all_failed() -> Self {
        Self {
            stage1: Vec::new(),
            stage2: Vec::new(),
            stage3: Stage3Result::all_failed(),
            metadata: PipelineMetadata::default(),
        }
    }

    /// Split into the `(stage1, stage2, stage3, metadata)` tuple.
    pub fn into_parts(
        self,
    ) -> (
        Vec<Stage1Result>,
        Vec<Stage2Result>,
        Stage3Result,
        PipelineMetadata,
    ) {
        (self.stage1, self.stage2, self.stage3, self.metadata)
    }

    /// Final answer text.
    pub fn final_answer(&self) -> &str {
        &self.stage3.response
    }
}

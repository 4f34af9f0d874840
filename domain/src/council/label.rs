//! Anonymous labels for Stage 1 answers.
//!
//! Judges in Stage 2 see answers as "Response A", "Response B", ... so they
//! cannot favour a backend by name. The [`LabelToBackend`] map is the only
//! place the real identity survives, and is built once per request.

use crate::core::backend::BackendId;
use crate::council::value_objects::Stage1Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of labels (`A` through `Z`).
pub const MAX_LABELS: usize = 26;

/// Prefix judges must use when referring to an answer.
pub const LABEL_PREFIX: &str = "Response";

/// Anonymous single-letter identifier for a Stage 1 answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Label(char);

impl Label {
    /// Label for the `index`-th successful answer, or `None` past `Z`.
    pub fn from_index(index: usize) -> Option<Self> {
        if index < MAX_LABELS {
            Some(Label((b'A' + index as u8) as char))
        } else {
            None
        }
    }

    pub fn letter(&self) -> char {
        self.0
    }

    /// Contiguous labels starting at `A`.
    pub fn sequence() -> impl Iterator<Item = Label> {
        (0..MAX_LABELS).filter_map(Label::from_index)
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", LABEL_PREFIX, self.0)
    }
}

/// An answer as a judge sees it: label and text, no backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnonymizedAnswer {
    pub label: Label,
    pub text: String,
}

/// Mapping from label tag (`"Response A"`) to the backend that wrote it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelToBackend(BTreeMap<String, BackendId>);

impl LabelToBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, label: Label, backend: BackendId) {
        self.0.insert(label.to_string(), backend);
    }

    /// Resolve a parsed label tag; unknown tags resolve to `None`.
    pub fn resolve(&self, tag: &str) -> Option<&BackendId> {
        self.0.get(tag)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BackendId)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for LabelToBackend {
    fn from(pairs: [(&str, &str); N]) -> Self {
        Self(
            pairs
                .into_iter()
                .map(|(tag, backend)| (tag.to_string(), BackendId::new(backend)))
                .collect(),
        )
    }
}

/// Assign labels to successful Stage 1 answers in their list order.
///
/// Labels are contiguous from `A` and exactly as many as answers (capped at
/// [`MAX_LABELS`]). Which backend gets `A` depends on which backends
/// succeeded, so labels are not stable across runs.
pub fn anonymize(stage1: &[Stage1Result]) -> (Vec<AnonymizedAnswer>, LabelToBackend) {
    let mut mapping = LabelToBackend::new();
    let answers = Label::sequence()
        .zip(stage1)
        .map(|(label, result)| {
            mapping.insert(label, result.backend.clone());
            AnonymizedAnswer {
                label,
                text: result.response.clone(),
            }
        })
        .collect();
    (answers, mapping)
}

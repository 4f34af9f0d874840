//! The council deliberation model.
//!
//! - [`config::CouncilConfig`] — roster of members, chairman and title model
//! - [`label`] — anonymous "Response X" labels and the label → backend map
//! - [`parsing::parse_ranking`] — best-effort extraction of a judge's ranking
//! - [`aggregate::aggregate_rankings`] — average position per backend
//! - [`value_objects`] — per-stage results and the full outcome
//! - [`event::CouncilEvent`] — progress events for streaming transports

pub mod aggregate;
pub mod config;
pub mod event;
pub mod label;
pub mod parsing;
pub mod value_objects;

pub use aggregate::aggregate_rankings;
pub use config::{CouncilConfig, MAX_COUNCIL_MEMBERS};
pub use event::{CouncilEvent, TitlePayload};
pub use label::{AnonymizedAnswer, Label, LabelToBackend, anonymize};
pub use parsing::{RANKING_MARKER, parse_ranking};
pub use value_objects::{
    AggregateEntry, CouncilOutcome, PipelineMetadata, Stage1Result, Stage2Result, Stage3Result,
};

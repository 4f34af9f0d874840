//! Progress events for streaming transports.
//!
//! Each event serializes independently as a JSON object tagged by `type`,
//! so a transport can forward them one per line or one per SSE frame.

use crate::council::value_objects::{
    PipelineMetadata, Stage1Result, Stage2Result, Stage3Result,
};
use serde::{Deserialize, Serialize};

/// Payload of [`CouncilEvent::TitleComplete`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePayload {
    pub title: String,
}

/// One step of a streaming council run, in emission order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CouncilEvent {
    Stage1Start,
    Stage1Complete {
        data: Vec<Stage1Result>,
    },
    Stage2Start,
    Stage2Complete {
        data: Vec<Stage2Result>,
        metadata: PipelineMetadata,
    },
    Stage3Start,
    Stage3Complete {
        data: Stage3Result,
    },
    TitleComplete {
        data: TitlePayload,
    },
    Complete,
    Error {
        message: String,
    },
}

impl CouncilEvent {
    pub fn title(title: impl Into<String>) -> Self {
        CouncilEvent::TitleComplete {
            data: TitlePayload {
                title: title.into(),
            },
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        CouncilEvent::Error {
            message: message.into(),
        }
    }

    /// Wire name of the event (`"stage1_start"`, ...).
    pub fn kind(&self) -> &'static str {
        match self {
            CouncilEvent::Stage1Start => "stage1_start",
            CouncilEvent::Stage1Complete { .. } => "stage1_complete",
            CouncilEvent::Stage2Start => "stage2_start",
            CouncilEvent::Stage2Complete { .. } => "stage2_complete",
            CouncilEvent::Stage3Start => "stage3_start",
            CouncilEvent::Stage3Complete { .. } => "stage3_complete",
            CouncilEvent::TitleComplete { .. } => "title_complete",
            CouncilEvent::Complete => "complete",
            CouncilEvent::Error { .. } => "error",
        }
    }

    /// Whether no further events follow this one.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CouncilEvent::Complete | CouncilEvent::Error { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_event_serialization() {
        let json = serde_json::to_value(CouncilEvent::Stage1Start).unwrap();
        assert_eq!(json, json!({"type": "stage1_start"}));
    }

    #[test]
    fn test_payload_event_serialization() {
        let event = CouncilEvent::Stage1Complete {
            data: vec![Stage1Result::new("m1", "hello")],
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(
            json,
            json!({"type": "stage1_complete", "data": [{"model": "m1", "response": "hello"}]})
        );
    }

    #[test]
    fn test_title_and_error() {
        let json = serde_json::to_value(CouncilEvent::title("Rust Basics")).unwrap();
        assert_eq!(json, json!({"type": "title_complete", "data": {"title": "Rust Basics"}}));

        let json = serde_json::to_value(CouncilEvent::error("no council")).unwrap();
        assert_eq!(json, json!({"type": "error", "message": "no council"}));
    }

    #[test]
    fn test_kind_matches_wire_tag() {
        let events = vec![
            CouncilEvent::Stage1Start,
            CouncilEvent::Stage2Start,
            CouncilEvent::Stage3Complete {
                data: Stage3Result::all_failed(),
            },
            CouncilEvent::Complete,
        ];
        for event in events {
            let json = serde_json::to_value(&event).unwrap();
            assert_eq!(json["type"], event.kind());
        }
    }

    #[test]
    fn test_deserialize_round_trip() {
        let line = r#"{"type":"stage2_complete","data":[],"metadata":{}}"#;
        let event: CouncilEvent = serde_json::from_str(line).unwrap();
        assert_eq!(
            event,
            CouncilEvent::Stage2Complete {
                data: vec![],
                metadata: PipelineMetadata::default()
            }
        );
        assert!(!event.is_terminal());
    }
}

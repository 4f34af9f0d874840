//! Council roster from TOML (`[council]` section)

use council_domain::{BackendId, CouncilConfig};
use council_domain::core::backend::{DEFAULT_CHAIRMAN, DEFAULT_COUNCIL, DEFAULT_TITLE_MODEL};
use serde::{Deserialize, Serialize};

/// Raw council configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Backends answering and judging, in order
    pub members: Vec<String>,
    /// Backend performing the final synthesis
    pub chairman: String,
    /// Fast backend used for conversation titles
    pub title_model: String,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: DEFAULT_COUNCIL.iter().map(|s| s.to_string()).collect(),
            chairman: DEFAULT_CHAIRMAN.to_string(),
            title_model: DEFAULT_TITLE_MODEL.to_string(),
        }
    }
}

impl FileCouncilConfig {
    pub fn to_council_config(&self) -> CouncilConfig {
        CouncilConfig {
            members: self.members.iter().map(|m| BackendId::new(m.trim())).collect(),
            chairman: BackendId::new(self.chairman.trim()),
            title_model: BackendId::new(self.title_model.trim()),
        }
    }
}

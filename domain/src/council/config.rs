//! Council roster: who answers, who synthesizes, who titles.

use crate::config::validation::{ConfigIssue, ConfigIssueCode};
use crate::core::backend::BackendId;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Largest council the prompts and label scheme are designed for.
pub const MAX_COUNCIL_MEMBERS: usize = 4;

/// Backends taking part in a council run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouncilConfig {
    /// Stage 1 answerers and Stage 2 judges, in configuration order
    pub members: Vec<BackendId>,
    /// Stage 3 synthesizer
    pub chairman: BackendId,
    /// Fast backend used for conversation titles
    pub title_model: BackendId,
}

impl Default for CouncilConfig {
    fn default() -> Self {
        Self {
            members: BackendId::default_council(),
            chairman: BackendId::default_chairman(),
            title_model: BackendId::default_title_model(),
        }
    }
}

impl CouncilConfig {
    pub fn new(members: Vec<BackendId>, chairman: BackendId) -> Self {
        Self {
            members,
            chairman,
            ..Default::default()
        }
    }

    pub fn with_title_model(mut self, title_model: BackendId) -> Self {
        self.title_model = title_model;
        self
    }

    /// Every problem with the roster, errors and warnings alike.
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.members.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyCouncil,
                "council.members is empty; at least one backend is required",
            ));
        }
        if self.members.len() > MAX_COUNCIL_MEMBERS {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::TooManyMembers,
                format!(
                    "council.members has {} entries; at most {} are supported",
                    self.members.len(),
                    MAX_COUNCIL_MEMBERS
                ),
            ));
        }
        for (i, member) in self.members.iter().enumerate() {
            if member.is_blank() {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::BlankBackendId,
                    format!("council.members[{}] is blank", i),
                ));
            } else if self.members[..i].contains(member) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::DuplicateMember,
                    format!("council.members lists '{}' more than once", member),
                ));
            }
        }
        if self.chairman.is_blank() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::BlankBackendId,
                "council.chairman is blank",
            ));
        }
        if self.title_model.is_blank() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::BlankBackendId,
                "council.title_model is blank",
            ));
        }

        issues
    }

    /// Hard checks a run cannot proceed without.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.members.is_empty() {
            return Err(DomainError::NoCouncilMembers);
        }
        if self.members.len() > MAX_COUNCIL_MEMBERS {
            return Err(DomainError::TooManyMembers(self.members.len()));
        }
        if let Some(blank) = self
            .members
            .iter()
            .chain([&self.chairman, &self.title_model])
            .find(|b| b.is_blank())
        {
            return Err(DomainError::InvalidBackend(blank.as_str().to_string()));
        }
        Ok(())
    }
}

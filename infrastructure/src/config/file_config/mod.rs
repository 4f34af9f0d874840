//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into domain/application
//! types once validated.

mod council;
mod limits;
mod openrouter;
mod output;

pub use council::FileCouncilConfig;
pub use limits::FileLimitsConfig;
pub use openrouter::FileOpenRouterConfig;
pub use output::{FileOutputConfig, FileOutputFormat};

use council_application::CouncilLimits;
use council_domain::{ConfigIssue, CouncilConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration rejected at startup
#[derive(Debug, Error)]
pub enum ConfigValidationError {
    #[error("invalid configuration:\n{}", format_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|i| format!("  - {}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council roster
    pub council: FileCouncilConfig,
    /// Context windows, concurrency, timeouts and retry
    pub limits: FileLimitsConfig,
    /// Provider connection settings
    pub openrouter: FileOpenRouterConfig,
    /// Output settings
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// This is the single entry point for config validation. It checks:
    /// 1. The council roster (size, blank and duplicate ids)
    /// 2. The numeric limits (concurrency, retries, timeouts, backoff)
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = self.to_council_config().issues();
        issues.extend(self.limits.validate());
        issues
    }

    /// Fail on any error-severity issue; warnings are returned for display.
    pub fn check(&self) -> Result<Vec<ConfigIssue>, ConfigValidationError> {
        let issues = self.validate();
        if ConfigIssue::has_errors(&issues) {
            return Err(ConfigValidationError::Invalid(
                issues.into_iter().filter(ConfigIssue::is_error).collect(),
            ));
        }
        Ok(issues)
    }

    pub fn to_council_config(&self) -> CouncilConfig {
        self.council.to_council_config()
    }

    pub fn to_limits(&self) -> CouncilLimits {
        self.limits.to_limits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use council_domain::{ConfigIssueCode, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[council]
members = ["openai/gpt-5.1", "x-ai/grok-4"]
chairman = "x-ai/grok-4"
title_model = "google/gemini-2.5-flash"

[limits]
max_concurrent_requests = 2
request_timeout_secs = 60
retry_jitter_secs = 0.1

[openrouter]
api_url = "http://localhost:8080/v1/chat/completions"

[output]
format = "full"
color = false
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.council.members.len(), 2);
        assert_eq!(config.limits.max_concurrent_requests, 2);
        assert_eq!(config.limits.request_timeout_secs, 60.0);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[limits]
retry_attempts = 5
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.to_limits().retry_attempts, 5);
        // Defaults should apply
        assert_eq!(config.council, FileCouncilConfig::default());
        assert_eq!(config.limits.max_context_turns, 8);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.council.members.len(), 4);
        assert_eq!(config.council.chairman, "google/gemini-3-pro-preview");
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert!(config.check().unwrap().is_empty());
    }

    #[test]
    fn test_check_rejects_errors_and_keeps_warnings() {
        let mut config = FileConfig::default();
        config.council.members = vec!["a".into(), "a".into()];
        let warnings = config.check().unwrap();
        assert_eq!(warnings[0].code, ConfigIssueCode::DuplicateMember);

        config.council.members.clear();
        config.limits.max_concurrent_requests = 0;
        let ConfigValidationError::Invalid(errors) = config.check().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.iter().all(ConfigIssue::is_error));
    }

    #[test]
    fn test_too_many_members_is_error() {
        let mut config = FileConfig::default();
        config.council.members = (0..5).map(|i| format!("m{}", i)).collect();
        let issues = config.validate();
        assert_eq!(issues[0].code, ConfigIssueCode::TooManyMembers);
        assert!(ConfigIssue::has_errors(&issues));
    }
}

//! Numeric tunables from TOML (`[limits]` section)

use council_application::CouncilLimits;
use council_domain::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw limits configuration from TOML
///
/// Durations are given in (fractional) seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub max_context_turns: usize,
    pub max_summary_turns: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout_secs: f64,
    pub title_timeout_secs: f64,
    pub retry_attempts: u32,
    pub retry_backoff_base_secs: f64,
    pub retry_jitter_secs: f64,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            max_context_turns: 8,
            max_summary_turns: 6,
            max_concurrent_requests: 4,
            request_timeout_secs: 120.0,
            title_timeout_secs: 30.0,
            retry_attempts: 3,
            retry_backoff_base_secs: 1.0,
            retry_jitter_secs: 0.35,
        }
    }
}

impl FileLimitsConfig {
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.max_concurrent_requests == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroConcurrency,
                "limits.max_concurrent_requests must be at least 1",
            ));
        }
        if self.retry_attempts == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroRetryAttempts,
                "limits.retry_attempts must be at least 1 (it counts the first try)",
            ));
        }
        for (name, value) in [
            ("request_timeout_secs", self.request_timeout_secs),
            ("title_timeout_secs", self.title_timeout_secs),
        ] {
            if !(value.is_finite() && value > 0.0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::NonPositiveTimeout,
                    format!("limits.{} must be positive, got {}", name, value),
                ));
            }
        }
        for (name, value) in [
            ("retry_backoff_base_secs", self.retry_backoff_base_secs),
            ("retry_jitter_secs", self.retry_jitter_secs),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::NegativeBackoff,
                    format!("limits.{} cannot be negative, got {}", name, value),
                ));
            }
        }
        if self.max_context_turns == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroContextWindow,
                "limits.max_context_turns is 0; council members will not see prior turns",
            ));
        }

        issues
    }

    /// Convert to application limits. Call [`validate`](Self::validate) first;
    /// out-of-range durations fall back to the defaults here.
    pub fn to_limits(&self) -> CouncilLimits {
        let defaults = CouncilLimits::default();
        CouncilLimits {
            max_context_turns: self.max_context_turns,
            max_summary_turns: self.max_summary_turns,
            max_concurrent_requests: self.max_concurrent_requests,
            request_timeout: secs(self.request_timeout_secs, defaults.request_timeout),
            title_timeout: secs(self.title_timeout_secs, defaults.title_timeout),
            retry_attempts: self.retry_attempts,
            retry_backoff_base: secs(self.retry_backoff_base_secs, defaults.retry_backoff_base),
            retry_jitter: secs(self.retry_jitter_secs, defaults.retry_jitter),
        }
    }
}

fn secs(value: f64, fallback: Duration) -> Duration {
    Duration::try_from_secs_f64(value).unwrap_or(fallback)
}

//! Structured configuration issues.
//!
//! Validation never stops at the first problem: every check contributes an
//! issue with a severity, so the caller can print all of them and decide
//! whether to abort (any [`Severity::Error`]) or continue with warnings.

use std::fmt;

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Fatal: the configuration cannot work at all.
    Error,
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// No council members configured.
    EmptyCouncil,
    /// More council members than labels the prompts are designed for.
    TooManyMembers,
    /// A member, chairman or title model id is empty.
    BlankBackendId,
    /// The same backend appears twice in the council.
    DuplicateMember,
    /// The concurrency cap is zero, so no call could ever start.
    ZeroConcurrency,
    /// Retry attempts is zero, so no call would ever be made.
    ZeroRetryAttempts,
    /// A timeout is zero or negative.
    NonPositiveTimeout,
    /// Backoff base or jitter is negative.
    NegativeBackoff,
    /// A context window of zero turns discards all history.
    ZeroContextWindow,
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns `true` if any issue is an error.
    pub fn has_errors(issues: &[ConfigIssue]) -> bool {
        issues.iter().any(ConfigIssue::is_error)
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {}", level, self.message)
    }
}

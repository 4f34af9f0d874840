//! Council limits: numeric tunables for a council run.
//!
//! [`CouncilLimits`] groups everything the dispatch machinery and the
//! use cases need besides the roster: context windows, the concurrency cap,
//! timeouts and the retry policy parameters.

use crate::dispatch::retry::RetryPolicy;
use council_domain::ContextBuilder;
use council_domain::history::context_builder::{
    DEFAULT_MAX_CONTEXT_TURNS, DEFAULT_MAX_SUMMARY_TURNS,
};
use std::time::Duration;

/// Numeric tunables for a council run.
///
/// | Field                     | Default | Used by                  |
/// |---------------------------|---------|--------------------------|
/// | `max_context_turns`       | 8       | Stage 1 context          |
/// | `max_summary_turns`       | 6       | Stage 3 history block    |
/// | `max_concurrent_requests` | 4       | ConcurrencyGate          |
/// | `request_timeout`         | 120s    | Stage 1/2/3 calls        |
/// | `title_timeout`           | 30s     | Title call               |
/// | `retry_attempts`          | 3       | RetryPolicy              |
/// | `retry_backoff_base`      | 1.0s    | RetryPolicy              |
/// | `retry_jitter`            | 0.35s   | RetryPolicy              |
/// Built from the `[limits]` file section; this type is never parsed directly.
#[derive(Debug, Clone, PartialEq)]
pub struct CouncilLimits {
    pub max_context_turns: usize,
    pub max_summary_turns: usize,
    pub max_concurrent_requests: usize,
    pub request_timeout: Duration,
    pub title_timeout: Duration,
    pub retry_attempts: u32,
    pub retry_backoff_base: Duration,
    pub retry_jitter: Duration,
}

impl Default for CouncilLimits {
    fn default() -> Self {
        Self {
            max_context_turns: DEFAULT_MAX_CONTEXT_TURNS,
            max_summary_turns: DEFAULT_MAX_SUMMARY_TURNS,
            max_concurrent_requests: 4,
            request_timeout: Duration::from_secs(120),
            title_timeout: Duration::from_secs(30),
            retry_attempts: 3,
            retry_backoff_base: Duration::from_secs(1),
            retry_jitter: Duration::from_millis(350),
        }
    }
}

impl CouncilLimits {
    // ==================== Builder Methods ====================

    pub fn with_max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = max;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_title_timeout(mut self, timeout: Duration) -> Self {
        self.title_timeout = timeout;
        self
    }

    pub fn with_retry(mut self, attempts: u32, base: Duration, jitter: Duration) -> Self {
        self.retry_attempts = attempts;
        self.retry_backoff_base = base;
        self.retry_jitter = jitter;
        self
    }

    pub fn with_context_windows(mut self, context_turns: usize, summary_turns: usize) -> Self {
        self.max_context_turns = context_turns;
        self.max_summary_turns = summary_turns;
        self
    }

    // ==================== Derived Values ====================

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_attempts,
            self.retry_backoff_base,
            self.retry_jitter,
        )
    }

    pub fn context_builder(&self) -> ContextBuilder {
        ContextBuilder::new(self.max_context_turns)
    }

    pub fn summary_builder(&self) -> ContextBuilder {
        ContextBuilder::new(self.max_summary_turns)
    }
}

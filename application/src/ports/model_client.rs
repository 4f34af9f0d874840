//! Model client port
//!
//! Defines the interface for issuing one chat-completion call to one backend.

use async_trait::async_trait;
use council_domain::{BackendId, ChatMessage, Completion};
use std::time::Duration;
use thiserror::Error;

/// HTTP statuses worth another attempt (rate limiting and transient server errors).
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Errors that can occur during a single model call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Concurrency gate is closed")]
    GateClosed,
}

impl GatewayError {
    /// Whether the failure is transient and the call should be retried.
    ///
    /// Timeouts, connection failures and 429/5xx are transient; everything
    /// else (other 4xx, unparseable bodies, configuration) fails immediately.
    pub fn is_retryable(&self) -> bool {
        match self {
            GatewayError::Timeout(_) | GatewayError::ConnectionError(_) => true,
            GatewayError::Status { status, .. } => RETRYABLE_STATUSES.contains(status),
            GatewayError::MalformedResponse(_)
            | GatewayError::Configuration(_)
            | GatewayError::GateClosed => false,
        }
    }
}

/// Client for a chat-completion provider
///
/// This port defines how the application layer talks to LLM backends.
/// Implementations (adapters) live in the infrastructure layer and must not
/// retry on their own: retry, timeout budgeting and the concurrency gate are
/// applied around them by [`crate::dispatch::CouncilContext`].
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Issue a single call; `timeout` bounds the whole request.
    async fn complete(
        &self,
        backend: &BackendId,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<Completion, GatewayError>;
}

#[async_trait]
impl<T: ModelClient + ?Sized> ModelClient for std::sync::Arc<T> {
    async fn complete(
        &self,
        backend: &BackendId,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<Completion, GatewayError> {
        (**self).complete(backend, messages, timeout).await
    }
}

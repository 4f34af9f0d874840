//! Orchestration context: one client, one gate, one retry policy.

use crate::config::CouncilLimits;
use crate::dispatch::gate::ConcurrencyGate;
use crate::dispatch::retry::RetryPolicy;
use crate::ports::model_client::{GatewayError, ModelClient};
use council_domain::{BackendId, ChatMessage, Completion};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Shared resources for every call made during the life of the process.
///
/// Constructed once at startup and passed explicitly to the use cases.
/// Cloning is cheap and every clone shares the same client and gate.
pub struct CouncilContext<C: ModelClient + ?Sized> {
    client: Arc<C>,
    gate: ConcurrencyGate,
    retry: RetryPolicy,
}

impl<C: ModelClient + ?Sized> Clone for CouncilContext<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            gate: self.gate.clone(),
            retry: self.retry,
        }
    }
}

impl<C: ModelClient + ?Sized> CouncilContext<C> {
    pub fn new(client: Arc<C>, gate: ConcurrencyGate, retry: RetryPolicy) -> Self {
        Self {
            client,
            gate,
            retry,
        }
    }

    /// Context sized from [`CouncilLimits`].
    pub fn from_limits(client: Arc<C>, limits: &CouncilLimits) -> Self {
        Self::new(
            client,
            ConcurrencyGate::new(limits.max_concurrent_requests),
            limits.retry_policy(),
        )
    }

    pub fn gate(&self) -> &ConcurrencyGate {
        &self.gate
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// One logical call: gate permit, then attempts under the retry policy.
    ///
    /// Each attempt is bounded by `timeout`; an attempt that overruns counts
    /// as [`GatewayError::Timeout`] and is retried like any transient failure.
    pub async fn call(
        &self,
        backend: &BackendId,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Result<Completion, GatewayError> {
        let _permit = self.gate.acquire().await?;
        let start = Instant::now();

        let result = self
            .retry
            .run(backend.as_str(), move || async move {
                match tokio::time::timeout(timeout, self.client.complete(backend, messages, timeout))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(GatewayError::Timeout(timeout)),
                }
            })
            .await;

        info!(
            model = %backend,
            elapsed_ms = start.elapsed().as_millis() as u64,
            success = result.is_ok(),
            "Model request finished"
        );
        result
    }

    /// Like [`call`](Self::call), but failures become `None`.
    ///
    /// This is the dispatcher boundary: errors are logged here and never
    /// travel further up the pipeline.
    pub async fn call_or_none(
        &self,
        backend: &BackendId,
        messages: &[ChatMessage],
        timeout: Duration,
    ) -> Option<Completion> {
        match self.call(backend, messages, timeout).await {
            Ok(completion) => Some(completion),
            Err(e) => {
                warn!(model = %backend, error = %e, "Model call failed");
                None
            }
        }
    }

    /// Release process-wide resources.
    ///
    /// Closes the gate so new calls fail fast with [`GatewayError::GateClosed`];
    /// calls already holding a permit run to completion. The HTTP pool closes
    /// when the last clone of the client is dropped.
    pub fn shutdown(&self) {
        if !self.gate.is_closed() {
            info!("Shutting down council context");
            self.gate.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct Flaky {
        failures_before_success: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl ModelClient for Flaky {
        async fn complete(
            &self,
            _backend: &BackendId,
            _messages: &[ChatMessage],
            _timeout: Duration,
        ) -> Result<Completion, GatewayError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures_before_success {
                Err(GatewayError::Status {
                    status: 503,
                    message: "overloaded".into(),
                })
            } else {
                Ok(Completion::from_text("ok"))
            }
        }
    }

    struct Slow;

    #[async_trait]
    impl ModelClient for Slow {
        async fn complete(
            &self,
            _backend: &BackendId,
            _messages: &[ChatMessage],
            _timeout: Duration,
        ) -> Result<Completion, GatewayError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(Completion::from_text("late"))
        }
    }

    fn fast_retry() -> RetryPolicy {
        RetryPolicy::new(3, Duration::from_millis(10), Duration::ZERO)
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_retries_transient_failures() {
        let client = Arc::new(Flaky {
            failures_before_success: 2,
            calls: AtomicU32::new(0),
        });
        let ctx = CouncilContext::new(Arc::clone(&client), ConcurrencyGate::new(1), fast_retry());
        let result = ctx
            .call(&BackendId::new("m"), &[], Duration::from_secs(5))
            .await;
        assert_eq!(result.unwrap().content, "ok");
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_call_or_none_swallows_exhaustion() {
        let client = Arc::new(Flaky {
            failures_before_success: u32::MAX,
            calls: AtomicU32::new(0),
        });
        let ctx = CouncilContext::new(Arc::clone(&client), ConcurrencyGate::new(1), fast_retry());
        let result = ctx
            .call_or_none(&BackendId::new("m"), &[], Duration::from_secs(5))
            .await;
        assert!(result.is_none());
        assert_eq!(client.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_attempt_is_bounded_by_timeout() {
        let ctx = CouncilContext::new(Arc::new(Slow), ConcurrencyGate::new(1), RetryPolicy::no_retry());
        let result = ctx
            .call(&BackendId::new("m"), &[], Duration::from_secs(2))
            .await;
        assert_eq!(result.unwrap_err(), GatewayError::Timeout(Duration::from_secs(2)));
    }

    #[tokio::test]
    async fn test_shutdown_fails_new_calls_fast() {
        let client = Arc::new(Flaky {
            failures_before_success: 0,
            calls: AtomicU32::new(0),
        });
        let ctx = CouncilContext::new(Arc::clone(&client), ConcurrencyGate::new(2), fast_retry());
        ctx.shutdown();
        let result = ctx
            .call(&BackendId::new("m"), &[], Duration::from_secs(5))
            .await;
        assert_eq!(result.unwrap_err(), GatewayError::GateClosed);
        assert_eq!(client.calls.load(Ordering::SeqCst), 0);
    }
}

//! Fan-out of one message list to many backends.

use crate::dispatch::context::CouncilContext;
use crate::ports::model_client::ModelClient;
use council_domain::{BackendId, ChatMessage, Completion};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::warn;

/// Outcome of one backend in a fan-out; `None` means the call failed.
pub type DispatchResult = (BackendId, Option<Completion>);

/// Issue one concurrent call per backend and wait for all of them.
///
/// Output has one entry per input backend, in input order, regardless of
/// completion order. A failing or panicking call yields `None` for that
/// backend only; it never aborts the others.
///
/// Each call runs as its own detached task. Dropping the returned future
/// stops waiting but lets calls already in flight run to completion.
pub async fn dispatch_all<C>(
    ctx: &CouncilContext<C>,
    backends: &[BackendId],
    messages: Arc<[ChatMessage]>,
    timeout: Duration,
) -> Vec<DispatchResult>
where
    C: ModelClient + ?Sized + 'static,
{
    let handles: Vec<JoinHandle<Option<Completion>>> = backends
        .iter()
        .map(|backend| {
            let ctx = ctx.clone();
            let backend = backend.clone();
            let messages = Arc::clone(&messages);
            tokio::spawn(async move { ctx.call_or_none(&backend, &messages, timeout).await })
        })
        .collect();

    let mut results = Vec::with_capacity(backends.len());
    for (backend, handle) in backends.iter().zip(handles) {
        let completion = match handle.await {
            Ok(completion) => completion,
            Err(e) => {
                warn!(backend = %backend, "Dispatch task join error: {}", e);
                None
            }
        };
        results.push((backend.clone(), completion));
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ConcurrencyGate, RetryPolicy};
    use crate::ports::model_client::GatewayError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Replies with the backend id after a per-backend delay; ids starting
    /// with "bad" fail permanently.
    struct Scripted {
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Scripted {
        fn new() -> Self {
            Self {
                in_flight: AtomicUsize::new(0),
                peak: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelClient for Scripted {
        async fn complete(
            &self,
            backend: &BackendId,
            _messages: &[ChatMessage],
            _timeout: Duration,
        ) -> Result<Completion, GatewayError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);

            // Later backends finish first so completion order is reversed.
            let delay = match backend.as_str() {
                "m1" => 300,
                "m2" => 200,
                _ => 100,
            };
            tokio::time::sleep(Duration::from_millis(delay)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if backend.as_str().starts_with("bad") {
                Err(GatewayError::Status {
                    status: 400,
                    message: "bad request".into(),
                })
            } else {
                Ok(Completion::from_text(format!("from {}", backend)))
            }
        }
    }

    fn ids(names: &[&str]) -> Vec<BackendId> {
        names.iter().map(|n| BackendId::new(*n)).collect()
    }

    fn context(client: Arc<Scripted>, cap: usize) -> CouncilContext<Scripted> {
        CouncilContext::new(client, ConcurrencyGate::new(cap), RetryPolicy::no_retry())
    }

    #[tokio::test(start_paused = true)]
    async fn test_output_follows_input_order() {
        let ctx = context(Arc::new(Scripted::new()), 4);
        let results = dispatch_all(&ctx, &ids(&["m1", "m2", "m3"]), Arc::from(vec![]), Duration::from_secs(5)).await;
        let order: Vec<&str> = results.iter().map(|(b, _)| b.as_str()).collect();
        assert_eq!(order, vec!["m1", "m2", "m3"]);
        assert_eq!(results[0].1.as_ref().unwrap().content, "from m1");
        assert_eq!(results[2].1.as_ref().unwrap().content, "from m3");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_is_contained() {
        let ctx = context(Arc::new(Scripted::new()), 4);
        let results = dispatch_all(&ctx, &ids(&["m1", "bad", "m3"]), Arc::from(vec![]), Duration::from_secs(5)).await;
        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_some());
        assert!(results[1].1.is_none());
        assert!(results[2].1.is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_concurrently() {
        let ctx = context(Arc::new(Scripted::new()), 4);
        let start = tokio::time::Instant::now();
        dispatch_all(&ctx, &ids(&["m1", "m2", "m3"]), Arc::from(vec![]), Duration::from_secs(5)).await;
        // Max of the latencies, not their sum.
        assert!(start.elapsed() < Duration::from_millis(400));
    }

    #[tokio::test(start_paused = true)]
    async fn test_peak_concurrency_respects_gate() {
        let client = Arc::new(Scripted::new());
        let ctx = context(Arc::clone(&client), 2);
        let backends = ids(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let results = dispatch_all(&ctx, &backends, Arc::from(vec![]), Duration::from_secs(5)).await;
        assert!(results.iter().all(|(_, c)| c.is_some()));
        assert_eq!(client.peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_dispatch_lets_calls_finish() {
        let client = Arc::new(Scripted::new());
        let ctx = context(Arc::clone(&client), 4);
        let backends = ids(&["m1", "m2", "m3"]);

        let abandoned = tokio::time::timeout(
            Duration::from_millis(10),
            dispatch_all(&ctx, &backends, Arc::from(vec![]), Duration::from_secs(5)),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(client.in_flight.load(Ordering::SeqCst), 3);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(client.in_flight.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_backend_list() {
        let ctx = context(Arc::new(Scripted::new()), 4);
        let results = dispatch_all(&ctx, &[], Arc::from(vec![]), Duration::from_secs(5)).await;
        assert!(results.is_empty());
    }
}

//! Run Council use case
//!
//! Orchestrates the three-stage council flow:
//!
//! ```text
//! START ─▶ Stage 1 ─▶ (no answers? ─▶ all-failed outcome)
//!              │
//!              ▼
//!          Stage 2 ─▶ aggregate ─▶ Stage 3 ─▶ DONE
//! ```
//!
//! Per-backend failures are contained at the dispatcher boundary. The only
//! errors this use case returns are invalid input and invalid configuration,
//! both checked before any call is made.

use crate::config::CouncilLimits;
use crate::dispatch::{CouncilContext, dispatch_all};
use crate::ports::model_client::ModelClient;
use crate::use_cases::generate_title::{FALLBACK_TITLE, GenerateTitleUseCase};
use council_domain::{
    BackendId, ChatMessage, CouncilConfig, CouncilEvent, CouncilOutcome, DomainError, HistoryTurn,
    LabelToBackend, PipelineMetadata, PromptTemplate, Stage1Result, Stage2Result, Stage3Result,
    aggregate_rankings, anonymize, parse_ranking,
};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors that can occur before a council run starts
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunCouncilError {
    #[error("Invalid council configuration: {0}")]
    InvalidConfig(DomainError),

    #[error("Invalid input: {0}")]
    InvalidInput(DomainError),
}

/// Input for the RunCouncil use case
#[derive(Debug, Clone)]
pub struct RunCouncilInput {
    /// The new user query
    pub query: String,
    /// Prior turns of the conversation (read-only)
    pub history: Vec<HistoryTurn>,
    /// Members, chairman and title model for this run
    pub council: CouncilConfig,
    /// Generate a title alongside the run (first turn of a conversation).
    ///
    /// Only [`RunCouncilUseCase::execute_streaming`] honours this, since the
    /// title is delivered as an event. [`RunCouncilUseCase::execute`] skips it;
    /// callers there use [`RunCouncilUseCase::title_use_case`] directly.
    pub generate_title: bool,
}

impl RunCouncilInput {
    pub fn new(query: impl Into<String>, council: CouncilConfig) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
            council,
            generate_title: false,
        }
    }

    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }

    pub fn with_title(mut self) -> Self {
        self.generate_title = true;
        self
    }

    fn validate(&self) -> Result<(), RunCouncilError> {
        self.council
            .validate()
            .map_err(RunCouncilError::InvalidConfig)?;
        if self.query.trim().is_empty() {
            return Err(RunCouncilError::InvalidInput(DomainError::EmptyQuery));
        }
        Ok(())
    }
}

/// Use case for running a full council deliberation
pub struct RunCouncilUseCase<C: ModelClient + ?Sized + 'static> {
    ctx: CouncilContext<C>,
    limits: CouncilLimits,
}

impl<C: ModelClient + ?Sized + 'static> RunCouncilUseCase<C> {
    pub fn new(ctx: CouncilContext<C>, limits: CouncilLimits) -> Self {
        Self { ctx, limits }
    }

    pub fn limits(&self) -> &CouncilLimits {
        &self.limits
    }

    /// Title use case sharing this council's context and title timeout.
    pub fn title_use_case(&self, title_model: BackendId) -> GenerateTitleUseCase<C> {
        GenerateTitleUseCase::new(self.ctx.clone(), title_model, self.limits.title_timeout)
    }

    /// Run all three stages and return the full outcome.
    pub async fn execute(&self, input: RunCouncilInput) -> Result<CouncilOutcome, RunCouncilError> {
        input.validate()?;
        let start = Instant::now();
        let council = &input.council;
        if input.generate_title {
            warn!("Title requested on a non-streaming run; skipping title generation");
        }

        info!(
            members = council.members.len(),
            chairman = %council.chairman,
            "Starting council"
        );

        let stage1 = self
            .stage1_collect(&input.query, &input.history, &council.members)
            .await;

        if stage1.is_empty() {
            warn!("All council members failed in stage 1; skipping stages 2 and 3");
            return Ok(CouncilOutcome::all_failed());
        }

        let (stage2, label_to_backend) = self
            .stage2_rank(&input.query, &stage1, &council.members)
            .await;
        let aggregate = aggregate_rankings(&stage2, &label_to_backend);

        let stage3 = self
            .stage3_synthesize(
                &input.query,
                &stage1,
                &stage2,
                &input.history,
                &council.chairman,
            )
            .await;

        info!(
            stage1_count = stage1.len(),
            stage2_count = stage2.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Council complete"
        );

        Ok(CouncilOutcome {
            stage1,
            stage2,
            stage3,
            metadata: PipelineMetadata::new(label_to_backend, aggregate),
        })
    }

    /// Run the council, publishing a [`CouncilEvent`] after each step.
    ///
    /// Events are emitted in order: `stage1_start`, `stage1_complete`,
    /// `stage2_start`, `stage2_complete`, `stage3_start`, `stage3_complete`,
    /// then `title_complete` (if requested) and `complete`. When Stage 1
    /// produces nothing the Stage 2 events are skipped and Stage 3 carries
    /// the all-failed placeholder. A closed receiver does not stop the run.
    pub async fn execute_streaming(
        &self,
        input: RunCouncilInput,
        events: mpsc::Sender<CouncilEvent>,
    ) -> Result<CouncilOutcome, RunCouncilError> {
        if let Err(e) = input.validate() {
            emit(&events, CouncilEvent::error(e.to_string())).await;
            return Err(e);
        }
        let start = Instant::now();
        let council = &input.council;

        // Started before Stage 1 and only awaited at the end, off the critical path.
        let title_task = input.generate_title.then(|| {
            let title_uc = self.title_use_case(council.title_model.clone());
            let query = input.query.clone();
            tokio::spawn(async move { title_uc.execute(&query).await })
        });

        emit(&events, CouncilEvent::Stage1Start).await;
        let stage1 = self
            .stage1_collect(&input.query, &input.history, &council.members)
            .await;
        emit(
            &events,
            CouncilEvent::Stage1Complete {
                data: stage1.clone(),
            },
        )
        .await;

        let outcome = if stage1.is_empty() {
            warn!("All council members failed in stage 1; skipping stages 2 and 3");
            let outcome = CouncilOutcome::all_failed();
            emit(&events, CouncilEvent::Stage3Start).await;
            emit(
                &events,
                CouncilEvent::Stage3Complete {
                    data: outcome.stage3.clone(),
                },
            )
            .await;
            outcome
        } else {
            emit(&events, CouncilEvent::Stage2Start).await;
            let (stage2, label_to_backend) = self
                .stage2_rank(&input.query, &stage1, &council.members)
                .await;
            let aggregate = aggregate_rankings(&stage2, &label_to_backend);
            let metadata = PipelineMetadata::new(label_to_backend, aggregate);
            emit(
                &events,
                CouncilEvent::Stage2Complete {
                    data: stage2.clone(),
                    metadata: metadata.clone(),
                },
            )
            .await;

            emit(&events, CouncilEvent::Stage3Start).await;
            let stage3 = self
                .stage3_synthesize(
                    &input.query,
                    &stage1,
                    &stage2,
                    &input.history,
                    &council.chairman,
                )
                .await;
            emit(
                &events,
                CouncilEvent::Stage3Complete {
                    data: stage3.clone(),
                },
            )
            .await;

            CouncilOutcome {
                stage1,
                stage2,
                stage3,
                metadata,
            }
        };

        if let Some(task) = title_task {
            let title = task.await.unwrap_or_else(|e| {
                warn!("Title task failed: {}", e);
                FALLBACK_TITLE.to_string()
            });
            emit(&events, CouncilEvent::title(title)).await;
        }

        info!(
            stage1_count = outcome.stage1.len(),
            stage2_count = outcome.stage2.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Council complete"
        );
        emit(&events, CouncilEvent::Complete).await;
        Ok(outcome)
    }

    /// Stage 1: every member answers the query with condensed history.
    ///
    /// Returns successes only, in council order.
    pub async fn stage1_collect(
        &self,
        query: &str,
        history: &[HistoryTurn],
        members: &[BackendId],
    ) -> Vec<Stage1Result> {
        let start = Instant::now();
        info!(models = members.len(), "Stage 1: collecting responses");

        let messages: Arc<[ChatMessage]> =
            self.limits.context_builder().build(history, query).into();
        debug!(context_messages = messages.len(), "Stage 1 context built");

        let results: Vec<Stage1Result> =
            dispatch_all(&self.ctx, members, messages, self.limits.request_timeout)
                .await
                .into_iter()
                .filter_map(|(backend, completion)| {
                    completion.map(|c| Stage1Result::new(backend, c.content))
                })
                .collect();

        info!(
            success_count = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stage 1 complete"
        );
        results
    }

    /// Stage 2: every configured member ranks the anonymized answers.
    ///
    /// Judges are the full council, including members that failed Stage 1.
    /// Failed judges are dropped; surviving results keep council order.
    pub async fn stage2_rank(
        &self,
        query: &str,
        stage1: &[Stage1Result],
        members: &[BackendId],
    ) -> (Vec<Stage2Result>, LabelToBackend) {
        let start = Instant::now();
        info!(judges = members.len(), answers = stage1.len(), "Stage 2: collecting rankings");

        let (answers, label_to_backend) = anonymize(stage1);
        let messages: Arc<[ChatMessage]> =
            vec![ChatMessage::user(PromptTemplate::ranking_prompt(query, &answers))].into();

        let results: Vec<Stage2Result> =
            dispatch_all(&self.ctx, members, messages, self.limits.request_timeout)
                .await
                .into_iter()
                .filter_map(|(judge, completion)| {
                    completion.map(|c| {
                        let parsed = parse_ranking(&c.content);
                        debug!(judge = %judge, parsed = parsed.len(), "Ranking parsed");
                        Stage2Result::new(judge, c.content, parsed)
                    })
                })
                .collect();

        info!(
            success_count = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stage 2 complete"
        );
        (results, label_to_backend)
    }

    /// Stage 3: the chairman synthesizes a final answer.
    ///
    /// Never fails: an exhausted chairman call yields the degraded
    /// "Unable to generate final synthesis" text.
    pub async fn stage3_synthesize(
        &self,
        query: &str,
        stage1: &[Stage1Result],
        stage2: &[Stage2Result],
        history: &[HistoryTurn],
        chairman: &BackendId,
    ) -> Stage3Result {
        let start = Instant::now();
        info!(chairman = %chairman, "Stage 3: synthesizing");

        let transcript = self.limits.summary_builder().transcript(history);
        let prompt = PromptTemplate::chairman_prompt(query, &transcript, stage1, stage2);
        let messages: Arc<[ChatMessage]> = vec![ChatMessage::user(prompt)].into();

        // Routed through the dispatcher so an abandoned run still lets the
        // chairman call finish.
        let reply = dispatch_all(
            &self.ctx,
            std::slice::from_ref(chairman),
            messages,
            self.limits.request_timeout,
        )
        .await
        .into_iter()
        .next()
        .and_then(|(_, completion)| completion);

        let result = match reply {
            Some(completion) => Stage3Result::new(chairman.clone(), completion.content),
            None => {
                warn!(chairman = %chairman, "Chairman failed; returning degraded synthesis");
                Stage3Result::synthesis_failed(chairman.clone())
            }
        };

        info!(
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Stage 3 complete"
        );
        result
    }
}

/// Send an event, ignoring a closed receiver.
async fn emit(events: &mpsc::Sender<CouncilEvent>, event: CouncilEvent) {
    if events.send(event).await.is_err() {
        debug!("Event receiver dropped; continuing without progress events");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{ConcurrencyGate, RetryPolicy};
    use crate::ports::model_client::GatewayError;
    use async_trait::async_trait;
    use council_domain::Completion;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// How a backend behaves for a given kind of prompt.
    #[derive(Clone)]
    enum Reply {
        Text(String),
        Fail,
    }

    /// Stub client that picks a reply by backend and by stage (detected from
    /// the prompt), and records every call it receives.
    #[derive(Default)]
    struct Council {
        answers: HashMap<String, Reply>,
        rankings: HashMap<String, Reply>,
        synthesis: HashMap<String, Reply>,
        calls: Mutex<Vec<(String, String)>>,
        in_flight: AtomicUsize,
        peak: AtomicUsize,
    }

    impl Council {
        fn answer(mut self, backend: &str, reply: Reply) -> Self {
            self.answers.insert(backend.into(), reply);
            self
        }

        fn rank(mut self, backend: &str, reply: Reply) -> Self {
            self.rankings.insert(backend.into(), reply);
            self
        }

        fn chair(mut self, backend: &str, reply: Reply) -> Self {
            self.synthesis.insert(backend.into(), reply);
            self
        }

        fn calls_for(&self, stage: &str) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(s, _)| s == stage)
                .map(|(_, b)| b.clone())
                .collect()
        }

        fn prompt_contains(&self, needle: &str) -> bool {
            self.calls.lock().unwrap().iter().any(|(_, b)| b.contains(needle))
        }
    }

    #[async_trait]
    impl ModelClient for Council {
        async fn complete(
            &self,
            backend: &BackendId,
            messages: &[ChatMessage],
            _timeout: Duration,
        ) -> Result<Completion, GatewayError> {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(50)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let prompt = messages.last().map(|m| m.content.as_str()).unwrap_or("");
            let (stage, table) = if prompt.contains("You are evaluating different responses") {
                ("stage2", &self.rankings)
            } else if prompt.contains("Chairman of an LLM Council") {
                ("stage3", &self.synthesis)
            } else if prompt.contains("Generate a very short title") {
                ("title", &self.synthesis)
            } else {
                ("stage1", &self.answers)
            };
            self.calls
                .lock()
                .unwrap()
                .push((stage.to_string(), backend.as_str().to_string()));
            if stage == "stage3" {
                self.calls
                    .lock()
                    .unwrap()
                    .push(("prompt".to_string(), prompt.to_string()));
            }

            if stage == "title" {
                return Ok(Completion::from_text("\"Council Title\""));
            }
            match table.get(backend.as_str()) {
                Some(Reply::Text(text)) => Ok(Completion::from_text(text.clone())),
                Some(Reply::Fail) | None => Err(GatewayError::Status {
                    status: 400,
                    message: "scripted failure".into(),
                }),
            }
        }
    }

    fn text(s: &str) -> Reply {
        Reply::Text(s.to_string())
    }

    fn council(members: &[&str], chairman: &str) -> CouncilConfig {
        CouncilConfig::new(
            members.iter().map(|m| BackendId::new(*m)).collect(),
            BackendId::new(chairman),
        )
        .with_title_model(BackendId::new("fast"))
    }

    fn use_case(client: Arc<Council>, cap: usize) -> RunCouncilUseCase<Council> {
        let limits = CouncilLimits::default().with_max_concurrent_requests(cap);
        let ctx = CouncilContext::new(client, ConcurrencyGate::new(cap), RetryPolicy::no_retry());
        RunCouncilUseCase::new(ctx, limits)
    }

    fn happy_council() -> Council {
        Council::default()
            .answer("m1", text("answer one"))
            .answer("m2", text("answer two"))
            .answer("m3", text("answer three"))
            .rank("m1", text("FINAL RANKING:\n1. Response B\n2. Response A\n3. Response C"))
            .rank("m2", text("FINAL RANKING:\n1. Response B\n2. Response C\n3. Response A"))
            .rank("m3", text("I liked Response A most"))
            .chair("chair", text("final synthesis"))
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_run() {
        let client = Arc::new(happy_council());
        let uc = use_case(Arc::clone(&client), 4);
        let outcome = uc
            .execute(RunCouncilInput::new("What is Rust?", council(&["m1", "m2", "m3"], "chair")))
            .await
            .unwrap();

        let backends: Vec<&str> = outcome.stage1.iter().map(|r| r.backend.as_str()).collect();
        assert_eq!(backends, vec!["m1", "m2", "m3"]);
        assert_eq!(outcome.stage2.len(), 3);
        assert_eq!(outcome.stage2[0].parsed_labels, vec!["Response B", "Response A", "Response C"]);
        assert_eq!(outcome.stage2[2].parsed_labels, vec!["Response A"]);
        assert_eq!(outcome.stage3, Stage3Result::new("chair", "final synthesis"));

        let meta = &outcome.metadata;
        assert_eq!(meta.label_to_backend.resolve("Response B").unwrap().as_str(), "m2");
        assert_eq!(meta.aggregate_rankings[0].backend.as_str(), "m2");
        assert_eq!(meta.aggregate_rankings[0].average_rank, 1.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_abandoned_run_lets_inflight_calls_finish() {
        let client = Arc::new(happy_council());
        let uc = use_case(Arc::clone(&client), 4);
        let input = RunCouncilInput::new("What is Rust?", council(&["m1", "m2", "m3"], "chair"));

        let abandoned = tokio::time::timeout(Duration::from_millis(10), uc.execute(input)).await;
        assert!(abandoned.is_err());
        assert!(client.calls_for("stage1").is_empty());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert_eq!(client.calls_for("stage1").len(), 3);
        // Later stages are never started once the run is dropped.
        assert!(client.calls_for("stage2").is_empty());
        assert!(client.calls_for("stage3").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_execute_skips_title_generation() {
        let client = Arc::new(happy_council());
        let uc = use_case(Arc::clone(&client), 4);
        let input =
            RunCouncilInput::new("What is Rust?", council(&["m1", "m2", "m3"], "chair")).with_title();

        let outcome = uc.execute(input).await.unwrap();

        assert_eq!(outcome.final_answer(), "final synthesis");
        assert!(client.calls_for("title").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_stage1_failure_relabels() {
        let client = Arc::new(
            happy_council()
                .answer("m1", Reply::Fail)
                .rank("m1", text("FINAL RANKING:\n1. Response A\n2. Response B")),
        );
        let uc = use_case(Arc::clone(&client), 4);
        let outcome = uc
            .execute(RunCouncilInput::new("q", council(&["m1", "m2", "m3"], "chair")))
            .await
            .unwrap();

        assert_eq!(outcome.stage1.len(), 2);
        let labels = &outcome.metadata.label_to_backend;
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.resolve("Response A").unwrap().as_str(), "m2");
        assert_eq!(labels.resolve("Response B").unwrap().as_str(), "m3");
        // m1 failed stage 1 but is still asked to judge.
        let mut judges = client.calls_for("stage2");
        judges.sort();
        assert_eq!(judges, vec!["m1", "m2", "m3"]);
        assert_eq!(outcome.stage2[0].judge.as_str(), "m1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_stage1_failures_short_circuit() {
        let client = Arc::new(
            Council::default()
                .answer("m1", Reply::Fail)
                .answer("m2", Reply::Fail)
                .chair("chair", text("should not be called")),
        );
        let uc = use_case(Arc::clone(&client), 4);
        let outcome = uc
            .execute(RunCouncilInput::new("q", council(&["m1", "m2"], "chair")))
            .await
            .unwrap();

        assert_eq!(outcome, CouncilOutcome::all_failed());
        assert!(client.calls_for("stage2").is_empty());
        assert!(client.calls_for("stage3").is_empty());
        let json = serde_json::to_value(&outcome.metadata).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_chairman_failure_degrades() {
        let client = Arc::new(happy_council().chair("chair", Reply::Fail));
        let uc = use_case(client, 4);
        let outcome = uc
            .execute(RunCouncilInput::new("q", council(&["m1", "m2", "m3"], "chair")))
            .await
            .unwrap();
        assert_eq!(outcome.stage3.chairman.as_str(), "chair");
        assert_eq!(outcome.stage3.response, "Error: Unable to generate final synthesis.");
        assert_eq!(outcome.stage1.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_chairman_sees_history_and_real_ids() {
        let client = Arc::new(happy_council());
        let uc = use_case(Arc::clone(&client), 4);
        let history = vec![
            HistoryTurn::user("earlier question"),
            HistoryTurn::assistant("earlier answer"),
        ];
        uc.execute(
            RunCouncilInput::new("q", council(&["m1", "m2", "m3"], "chair")).with_history(history),
        )
        .await
        .unwrap();

        assert!(client.prompt_contains("User: earlier question\n\nAssistant: earlier answer"));
        assert!(client.prompt_contains("Model: m2\nResponse: answer two"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_peak_concurrency_never_exceeds_cap() {
        let client = Arc::new(happy_council().answer("m4", text("four")).rank("m4", text("none")));
        let uc = use_case(Arc::clone(&client), 2);
        uc.execute(RunCouncilInput::new("q", council(&["m1", "m2", "m3", "m4"], "chair")))
            .await
            .unwrap();
        assert_eq!(client.peak.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_config_errors_are_raised_before_dispatch() {
        let client = Arc::new(happy_council());
        let uc = use_case(Arc::clone(&client), 4);
        let err = uc
            .execute(RunCouncilInput::new("q", council(&[], "chair")))
            .await
            .unwrap_err();
        assert_eq!(err, RunCouncilError::InvalidConfig(DomainError::NoCouncilMembers));

        let err = uc
            .execute(RunCouncilInput::new("   ", council(&["m1"], "chair")))
            .await
            .unwrap_err();
        assert_eq!(err, RunCouncilError::InvalidInput(DomainError::EmptyQuery));
        assert!(client.calls.lock().unwrap().is_empty());
    }

    async fn collect(mut rx: mpsc::Receiver<CouncilEvent>) -> Vec<CouncilEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    fn kinds(events: &[CouncilEvent]) -> Vec<&'static str> {
        events.iter().map(CouncilEvent::kind).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn test_streaming_event_order() {
        let uc = use_case(Arc::new(happy_council()), 4);
        let (tx, rx) = mpsc::channel(32);
        let input = RunCouncilInput::new("q", council(&["m1", "m2", "m3"], "chair")).with_title();
        let outcome = uc.execute_streaming(input, tx).await.unwrap();
        let events = collect(rx).await;

        assert_eq!(
            kinds(&events),
            vec![
                "stage1_start",
                "stage1_complete",
                "stage2_start",
                "stage2_complete",
                "stage3_start",
                "stage3_complete",
                "title_complete",
                "complete",
            ]
        );
        assert_eq!(events[6], CouncilEvent::title("Council Title"));
        assert_eq!(
            events[5],
            CouncilEvent::Stage3Complete {
                data: outcome.stage3.clone()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_streaming_short_circuit() {
        let client = Arc::new(Council::default().answer("m1", Reply::Fail));
        let uc = use_case(Arc::clone(&client), 4);
        let (tx, rx) = mpsc::channel(32);
        uc.execute_streaming(RunCouncilInput::new("q", council(&["m1"], "chair")), tx)
            .await
            .unwrap();
        let events = collect(rx).await;

        assert_eq!(
            kinds(&events),
            vec!["stage1_start", "stage1_complete", "stage3_start", "stage3_complete", "complete"]
        );
        assert_eq!(events[1], CouncilEvent::Stage1Complete { data: vec![] });
        assert_eq!(
            events[3],
            CouncilEvent::Stage3Complete {
                data: Stage3Result::all_failed()
            }
        );
        assert!(client.calls_for("stage2").is_empty());
    }

    #[tokio::test]
    async fn test_streaming_config_error_emits_error_event() {
        let uc = use_case(Arc::new(happy_council()), 4);
        let (tx, rx) = mpsc::channel(8);
        let result = uc
            .execute_streaming(RunCouncilInput::new("q", council(&[], "chair")), tx)
            .await;
        assert!(result.is_err());
        let events = collect(rx).await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind(), "error");
    }

    #[tokio::test(start_paused = true)]
    async fn test_streaming_survives_dropped_receiver() {
        let uc = use_case(Arc::new(happy_council()), 4);
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let outcome = uc
            .execute_streaming(RunCouncilInput::new("q", council(&["m1", "m2", "m3"], "chair")), tx)
            .await
            .unwrap();
        assert_eq!(outcome.stage3.response, "final synthesis");
    }
}

//! Live progress for council runs
//!
//! Progress is driven entirely by [`CouncilEvent`]s from the streaming
//! variant of the run, so the same sinks work for one-shot and chat use.

pub mod reporter;

use council_application::{ModelClient, RunCouncilError, RunCouncilInput, RunCouncilUseCase};
use council_domain::{CouncilEvent, CouncilOutcome};
use tokio::sync::mpsc;

pub use reporter::{
    EventLinePrinter, ProgressMode, ProgressReporter, SilentProgress, SimpleProgress,
};

/// Capacity of the event channel between the run and its consumer.
const EVENT_BUFFER: usize = 16;

/// Receives council events as stages start and finish
pub trait ProgressNotifier {
    fn on_event(&self, event: &CouncilEvent);
}

/// Run the streaming variant and hand every event to `on_event` as it arrives.
///
/// The run and the consumer are polled on the current task; the consumer
/// finishes once the run drops its sender.
pub async fn stream_council<C, F>(
    use_case: &RunCouncilUseCase<C>,
    input: RunCouncilInput,
    mut on_event: F,
) -> Result<CouncilOutcome, RunCouncilError>
where
    C: ModelClient + ?Sized + 'static,
    F: FnMut(CouncilEvent),
{
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let run = use_case.execute_streaming(input, tx);
    let drain = async {
        while let Some(event) = rx.recv().await {
            on_event(event);
        }
    };
    let (result, ()) = tokio::join!(run, drain);
    result
}

/// [`stream_council`] feeding a [`ProgressNotifier`].
pub async fn run_with_progress<C, P>(
    use_case: &RunCouncilUseCase<C>,
    input: RunCouncilInput,
    progress: &P,
) -> Result<CouncilOutcome, RunCouncilError>
where
    C: ModelClient + ?Sized + 'static,
    P: ProgressNotifier + ?Sized,
{
    stream_council(use_case, input, |event| progress.on_event(&event)).await
}

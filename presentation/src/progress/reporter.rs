//! Progress reporters for council execution

use crate::output::console::ConsoleFormatter;
use crate::progress::ProgressNotifier;
use colored::Colorize;
use council_domain::CouncilEvent;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::sync::Mutex;
use std::time::Duration;

/// Display name for the stage an event starts, if it starts one.
fn stage_started(event: &CouncilEvent) -> Option<&'static str> {
    match event {
        CouncilEvent::Stage1Start => Some("Stage 1: Collecting responses"),
        CouncilEvent::Stage2Start => Some("Stage 2: Peer rankings"),
        CouncilEvent::Stage3Start => Some("Stage 3: Chairman synthesis"),
        _ => None,
    }
}

/// Summary line for an event that finishes a stage.
fn stage_finished(event: &CouncilEvent) -> Option<String> {
    match event {
        CouncilEvent::Stage1Complete { data } => {
            Some(format!("Stage 1 complete: {} responses", data.len()))
        }
        CouncilEvent::Stage2Complete { data, metadata } => {
            let leader = metadata
                .aggregate_rankings
                .first()
                .map(|e| format!(", leading: {}", e.backend))
                .unwrap_or_default();
            Some(format!("Stage 2 complete: {} rankings{}", data.len(), leader))
        }
        CouncilEvent::Stage3Complete { data } => {
            Some(format!("Stage 3 complete: synthesized by {}", data.chairman))
        }
        _ => None,
    }
}

/// Reports progress during council execution with spinners
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} [{elapsed}]")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn start(&self, name: &'static str) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(name);
        pb.set_message("running...");
        pb.enable_steady_tick(Duration::from_millis(100));
        if let Ok(mut slot) = self.bar.lock() {
            if let Some(previous) = slot.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn finish(&self, message: String) {
        if let Some(pb) = self.bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.set_style(ProgressStyle::default_spinner());
            pb.finish_with_message(format!("{} {}", "v".green(), message));
        }
    }

    /// Drop any spinner still running when the run ends.
    fn clear(&self) {
        if let Some(pb) = self.bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.finish_and_clear();
        }
    }

    fn abandon(&self, message: &str) {
        if let Some(pb) = self.bar.lock().ok().and_then(|mut slot| slot.take()) {
            pb.abandon_with_message(format!("{} {}", "x".red(), message));
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_event(&self, event: &CouncilEvent) {
        if let Some(name) = stage_started(event) {
            self.start(name);
        } else if let Some(message) = stage_finished(event) {
            self.finish(message);
        } else if event.is_terminal() {
            match event {
                CouncilEvent::Error { message } => self.abandon(message),
                _ => self.clear(),
            }
        }
    }
}

/// Which progress sink a run should use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Animated spinners on an interactive terminal
    Live,
    /// One plain line per stage, for logs and pipes
    Plain,
    /// No progress output
    Silent,
}

impl ProgressMode {
    pub fn select(show_progress: bool, stderr_is_terminal: bool) -> Self {
        match (show_progress, stderr_is_terminal) {
            (false, _) => ProgressMode::Silent,
            (true, true) => ProgressMode::Live,
            (true, false) => ProgressMode::Plain,
        }
    }

    /// [`ProgressMode::select`] against the real stderr.
    pub fn detect(show_progress: bool) -> Self {
        Self::select(show_progress, std::io::stderr().is_terminal())
    }

    pub fn notifier(self) -> Box<dyn ProgressNotifier> {
        match self {
            ProgressMode::Live => Box::new(ProgressReporter::new()),
            ProgressMode::Plain => Box::new(SimpleProgress),
            ProgressMode::Silent => Box::new(SilentProgress),
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_event(&self, event: &CouncilEvent) {
        if let Some(name) = stage_started(event) {
            eprintln!("{} {}", "->".cyan(), name.bold());
        } else if let Some(message) = stage_finished(event) {
            eprintln!("  {} {}", "v".green(), message);
        } else if let CouncilEvent::Error { message } = event {
            eprintln!("  {} {}", "x".red(), message);
        }
    }
}

/// No progress output at all (`--quiet`)
pub struct SilentProgress;

impl ProgressNotifier for SilentProgress {
    fn on_event(&self, _event: &CouncilEvent) {}
}

/// Writes each event to stdout as one JSON line
pub struct EventLinePrinter;

impl ProgressNotifier for EventLinePrinter {
    fn on_event(&self, event: &CouncilEvent) {
        println!("{}", ConsoleFormatter::format_event(event));
    }
}

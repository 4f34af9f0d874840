//! Presentation layer for llm-council
//!
//! This crate contains CLI definitions, output formatters,
//! progress reporters, and interactive chat interface.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::{ChatCommand, ChatRepl};
pub use cli::commands::{Cli, OutputArg};
pub use config::OutputSettings;
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::reporter::{
    EventLinePrinter, ProgressMode, ProgressReporter, SilentProgress, SimpleProgress,
};
pub use progress::{ProgressNotifier, run_with_progress, stream_council};

//! Presentation-level configuration
//!
//! Output settings resolved from the command line and the `[output]`
//! section of the config file. Flags win over the file.

use crate::cli::commands::Cli;
use council_domain::OutputFormat;

/// Resolved output behaviour for one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show the live progress reporter
    pub show_progress: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            color: true,
            show_progress: true,
        }
    }
}

impl OutputSettings {
    /// Combine CLI flags with file settings.
    ///
    /// The `events` format always disables the progress reporter, since both
    /// would write to the terminal at the same time.
    pub fn resolve(
        cli: &Cli,
        file_format: Option<OutputFormat>,
        file_color: bool,
        file_progress: bool,
    ) -> Self {
        let format = cli
            .output
            .map(OutputFormat::from)
            .or(file_format)
            .unwrap_or_default();
        Self {
            format,
            color: file_color && !cli.no_color,
            show_progress: file_progress && !cli.quiet && !format.is_streaming(),
        }
    }

    /// Apply process-wide terminal settings.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

//! CLI command definitions

use clap::{Parser, ValueEnum};
use council_domain::OutputFormat;
use std::path::PathBuf;

/// Output format accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    /// Only the chairman's final answer
    Synthesis,
    /// All three stages plus aggregate rankings
    Full,
    /// The complete outcome as JSON
    Json,
    /// One JSON event per line while the council runs
    Events,
}

impl From<OutputArg> for OutputFormat {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Synthesis => OutputFormat::Synthesis,
            OutputArg::Full => OutputFormat::Full,
            OutputArg::Json => OutputFormat::Json,
            OutputArg::Events => OutputFormat::Events,
        }
    }
}

/// CLI arguments for llm-council
#[derive(Parser, Debug)]
#[command(name = "llm-council")]
#[command(author, version, about = "LLM Council - models answer, rank each other, a chairman synthesizes")]
#[command(long_about = r#"
LLM Council sends your question to several models and combines their work.

The process has three stages:
1. Collect: every council member answers independently, in parallel
2. Rank: every member ranks the anonymized answers ("Response A", ...)
3. Synthesize: the chairman writes the final answer from answers and rankings

Configuration files are loaded from (in priority order):
1. LLM_COUNCIL_* environment variables
2. --config <path>          Explicit config file
3. ./llm-council.toml       Project-level config
4. ~/.config/llm-council/config.toml   Global config

The OpenRouter API key is read from OPENROUTER_API_KEY unless set in config.

Example:
  llm-council "What's the best way to handle errors in Rust?"
  llm-council -m openai/gpt-5.1 -m x-ai/grok-4 --chairman x-ai/grok-4 "Compare async runtimes"
  llm-council --chat
"#)]
pub struct Cli {
    /// The question to ask the council (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Council members (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Model that writes the final synthesis
    #[arg(long, value_name = "MODEL")]
    pub chairman: Option<String>,

    /// Model used to title a conversation
    #[arg(long, value_name = "MODEL")]
    pub title_model: Option<String>,

    /// Output format (defaults to the configured one, then synthesis)
    #[arg(short, long, value_enum)]
    pub output: Option<OutputArg>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

impl Cli {
    /// Default log level for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_one_shot() {
        let cli = Cli::try_parse_from([
            "llm-council",
            "-m",
            "a/one",
            "-m",
            "b/two",
            "--chairman",
            "b/two",
            "-o",
            "full",
            "What is Rust?",
        ])
        .unwrap();

        assert_eq!(cli.question.as_deref(), Some("What is Rust?"));
        assert_eq!(cli.model, vec!["a/one", "b/two"]);
        assert_eq!(cli.chairman.as_deref(), Some("b/two"));
        assert_eq!(cli.output.map(OutputFormat::from), Some(OutputFormat::Full));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["llm-council", "--chat"]).unwrap();
        assert!(cli.chat);
        assert!(cli.question.is_none());
        assert!(cli.model.is_empty());
        assert!(cli.output.is_none());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_verbosity_levels() {
        let cli = Cli::try_parse_from(["llm-council", "-vv", "q"]).unwrap();
        assert_eq!(cli.log_level(), "debug");
        let cli = Cli::try_parse_from(["llm-council", "-vvvv", "q"]).unwrap();
        assert_eq!(cli.log_level(), "trace");
    }

    #[test]
    fn test_events_output() {
        let cli = Cli::try_parse_from(["llm-council", "-o", "events", "q"]).unwrap();
        assert_eq!(cli.output, Some(OutputArg::Events));
        assert!(Cli::try_parse_from(["llm-council", "-o", "yaml", "q"]).is_err());
    }
}

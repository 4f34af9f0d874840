//! CLI entrypoint for LLM Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{CouncilContext, RunCouncilInput, RunCouncilUseCase};
use council_domain::{CouncilConfig, OutputFormat};
use council_infrastructure::{ConfigLoader, FileConfig, OpenRouterClient};
use council_presentation::{
    ChatRepl, Cli, ConsoleFormatter, EventLinePrinter, OutputFormatter, OutputSettings,
    ProgressMode, run_with_progress,
};
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_logging(&cli)?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    info!("Starting LLM Council");

    let file_config = load_config(&cli)?;
    for warning in file_config.check()? {
        eprintln!("{}", warning);
    }

    let settings = OutputSettings::resolve(
        &cli,
        file_config.output.format,
        file_config.output.color,
        file_config.output.show_progress,
    );
    settings.apply();

    let council = file_config.to_council_config();
    let limits = file_config.to_limits();

    // === Dependency Injection ===
    let client = Arc::new(
        OpenRouterClient::new(file_config.openrouter.to_settings())
            .context("failed to create OpenRouter client")?,
    );
    let ctx = CouncilContext::from_limits(client, &limits);
    let use_case = RunCouncilUseCase::new(ctx.clone(), limits);

    let result = if cli.chat {
        ChatRepl::new(use_case, council)
            .with_progress(settings.show_progress)
            .run()
            .await
            .map_err(anyhow::Error::from)
    } else {
        run_once(&cli, &use_case, council, settings).await
    };

    ctx.shutdown();
    result
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` takes precedence over `-v`. With `--log-file`, output goes
/// through a non-blocking file writer instead of stderr.
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));

    let Some(path) = &cli.log_file else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
        return Ok(None);
    };

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("--log-file must name a file: {}", path.display()))?;
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));
    let (writer, guard) =
        tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .init();
    Ok(Some(guard))
}

/// Load layered configuration and apply command-line overrides.
fn load_config(cli: &Cli) -> Result<FileConfig> {
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("failed to load configuration: {}", e))?
    };

    if !cli.model.is_empty() {
        config.council.members = cli.model.clone();
    }
    if let Some(chairman) = &cli.chairman {
        config.council.chairman = chairman.clone();
    }
    if let Some(title_model) = &cli.title_model {
        config.council.title_model = title_model.clone();
    }
    Ok(config)
}

/// Single question mode
async fn run_once(
    cli: &Cli,
    use_case: &RunCouncilUseCase<OpenRouterClient>,
    council: CouncilConfig,
    settings: OutputSettings,
) -> Result<()> {
    let Some(question) = cli.question.clone() else {
        bail!("Question is required. Use --chat for interactive mode.");
    };

    let input = RunCouncilInput::new(question.clone(), council);

    let outcome = if settings.format == OutputFormat::Events {
        run_with_progress(use_case, input, &EventLinePrinter).await?
    } else if settings.show_progress {
        let progress = ProgressMode::detect(true).notifier();
        run_with_progress(use_case, input, progress.as_ref()).await?
    } else {
        use_case.execute(input).await?
    };

    if let Some(output) = ConsoleFormatter.render(settings.format, &question, &outcome) {
        println!("{}", output);
    }

    Ok(())
}

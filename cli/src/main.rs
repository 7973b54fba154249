//! CLI entrypoint for cnpj-lookup
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use lookup_application::{LookupOutcome, LookupProgress, LookupSummary, NoProgress, RenderSink};
use lookup_infrastructure::{ConfigLoader, FileConfig, FileOutputFormat, build_gateways};
use lookup_presentation::{
    Cli, ConsoleFormatter, ConsoleSink, InteractiveSession, JsonFormatter, JsonLinesSink,
    OutputFormat, ProgressReporter, SimpleProgress,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&cli)?;

    info!("Starting cnpj-lookup");

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    config.validate().context("Invalid configuration")?;

    if cli.show_config {
        show_config(&cli, &config)?;
        return Ok(ExitCode::SUCCESS);
    }

    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Pretty) | None => OutputFormat::Pretty,
    });
    let color = config.output.color && !cli.no_color && std::io::stdout().is_terminal();

    // === Dependency Injection ===
    let lookup_config = config.lookup_config();
    let gateways = build_gateways(&config, &lookup_config)?;
    let lookup = Arc::new(lookup_config.build_lookup(gateways)?);

    let sink: Arc<dyn RenderSink> = match format {
        OutputFormat::Pretty => Arc::new(ConsoleSink::new(color)),
        OutputFormat::Json => Arc::new(JsonLinesSink),
    };

    // Interactive mode
    if cli.interactive {
        let session = InteractiveSession::new(lookup, Arc::clone(&sink))
            .with_prompt(format == OutputFormat::Pretty && !cli.quiet);
        let summaries = session.run().await;
        info!("Interactive session ended after {} lookup(s)", summaries.len());
        return Ok(ExitCode::SUCCESS);
    }

    // Single lookup mode - id is required
    let Some(input) = cli.cnpj.as_deref() else {
        bail!("A CNPJ is required. Use --interactive to read ids from stdin.");
    };

    let progress: Box<dyn LookupProgress> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let summary = lookup
        .execute_with_progress(input, sink.as_ref(), progress.as_ref())
        .await;

    print_summary(&summary, format, cli.quiet);
    Ok(exit_code(&summary))
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    // Initialize logging based on verbosity level
    let filter = || match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    let (file_layer, guard) = match &cli.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("Invalid log file path: {}", path.display()))?;
            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(filter()),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    ConfigLoader::print_config_sources(cli.config.as_ref());
    println!();
    println!("Effective configuration:");
    println!("{}", config.to_toml().context("Failed to render configuration")?);
    Ok(())
}

fn print_summary(summary: &LookupSummary, format: OutputFormat, quiet: bool) {
    match format {
        OutputFormat::Json => JsonLinesSink::write_line(&JsonFormatter::summary(summary)),
        OutputFormat::Pretty if !quiet => print!("{}", ConsoleFormatter::format_summary(summary)),
        OutputFormat::Pretty => {}
    }
}

fn exit_code(summary: &LookupSummary) -> ExitCode {
    match summary.outcome {
        LookupOutcome::Rendered { .. } | LookupOutcome::Superseded => ExitCode::SUCCESS,
        LookupOutcome::Rejected { .. } => ExitCode::from(2),
        LookupOutcome::AllSourcesFailed => ExitCode::from(3),
    }
}

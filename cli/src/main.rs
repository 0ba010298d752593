//! CLI entrypoint for Scribe Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, bail};
use clap::Parser;
use scribe_application::{
    NoProgress, NoTranscriptLogger, RunWritingUseCase, TranscriptLogger, WritingSession,
};
use scribe_domain::Request;
use scribe_infrastructure::{
    ConfigLoader, FileConfig, JsonlTranscriptLogger, OpenAiOracle, Severity, default_dispatcher,
    default_targets,
};
use scribe_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputFormat, ProgressReporter, ReplConfig,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };
    apply_overrides(&mut config, &cli);

    let _log_guard = init_tracing(cli.verbose, &config);
    info!("Starting Scribe Council");

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}: {}", issue.field, issue.message),
            Severity::Warning => eprintln!("config warning: {}: {}", issue.field, issue.message),
        }
    }
    if FileConfig::has_errors(&issues) {
        bail!("Invalid configuration. Run with --show-config to see which files were loaded.");
    }

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let oracle = Arc::new(OpenAiOracle::new(config.oracle.to_settings()?)?);
    let registry = default_targets(config.workers.research_notes)?;
    let dispatcher = Arc::new(default_dispatcher(
        Arc::clone(&oracle),
        config.workers.research_notes,
    ));

    let transcript: Arc<dyn TranscriptLogger> = match &config.output.transcript {
        Some(path) => match JsonlTranscriptLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => {
                warn!("Transcript disabled: could not open {}", path.display());
                Arc::new(NoTranscriptLogger)
            }
        },
        None => Arc::new(NoTranscriptLogger),
    };

    let cancellation = CancellationToken::new();
    let use_case = RunWritingUseCase::new(oracle, dispatcher, config.execution_params())
        .with_transcript(transcript)
        .with_cancellation(cancellation.clone());
    let mut session = WritingSession::new(use_case, registry);

    // Interactive mode
    let Some(request) = cli.request.clone() else {
        let repl_config = ReplConfig {
            show_progress: config.repl.show_progress && !cli.quiet,
            history_file: config.repl.history_file.clone(),
            default_prompt: config.repl.default_prompt.clone(),
        };
        let mut repl = ChatRepl::new(session, repl_config);
        repl.run().await?;
        return Ok(());
    };

    // Single request mode
    let request = Request::try_new(request)?;

    let ctrl_c_token = cancellation.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.cancel();
        }
    });

    if !cli.quiet && cli.output == OutputFormat::Text {
        println!();
        println!("+============================================================+");
        println!("|           Scribe Council - Writing Council                 |");
        println!("+============================================================+");
        println!();
        println!("Request: {}", request.content());
        println!("Model: {}", config.oracle.model);
        println!();
    }

    let outcome = if cli.quiet {
        session.submit_with_progress(request, &NoProgress).await
    } else {
        let progress = ProgressReporter::new();
        session.submit_with_progress(request, &progress).await
    };

    match cli.output {
        OutputFormat::Text => {
            println!("{}", ConsoleFormatter::format(&outcome));
            if !cli.quiet {
                println!("{}", ConsoleFormatter::format_summary(&outcome));
            }
        }
        OutputFormat::Json => println!("{}", ConsoleFormatter::format_json(&outcome)),
    }

    Ok(())
}

/// Command-line flags take precedence over every configuration source
fn apply_overrides(config: &mut FileConfig, cli: &Cli) {
    if let Some(top_k) = cli.top_k {
        config.controller.top_k = top_k;
    }
    if let Some(threshold) = cli.threshold {
        config.controller.response_threshold = threshold;
    }
    if let Some(max_rounds) = cli.max_rounds {
        config.budget.max_rounds = max_rounds;
    }
    if let Some(seconds) = cli.budget_seconds {
        config.budget.seconds = Some(seconds);
    }
    if let Some(model) = &cli.model {
        config.oracle.model = model.clone();
    }
    if cli.research_notes {
        config.workers.research_notes = true;
    }
    if let Some(path) = &cli.transcript {
        config.output.transcript = Some(path.clone());
    }
}

/// Stderr logging by verbosity, plus a daily log file when `[logging] directory` is set
///
/// `RUST_LOG` overrides the verbosity flags.
fn init_tracing(verbose: u8, config: &FileConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    match &config.logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "scribe-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            tracing_subscriber::registry()
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry().with(stderr_layer).init();
            None
        }
    }
}

//! CLI entrypoint for AI Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use council_application::{
    AskCouncilUseCase, ConversationLogger, DurableCacheStore, NoConversationLogger, ResultCache,
};
use council_infrastructure::{
    ConfigLoader, FileCacheStore, FileConfig, JsonlConversationLogger, build_registry,
};
use council_presentation::{
    AppState, AskArgs, Cli, Command, ConsoleFormatter, OutputFormat, ProgressReporter,
    RateLimiter, ServeArgs,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?
    };

    // Keep the guard alive so buffered file logs are written on exit
    let _log_guard = init_tracing(cli.verbose, &config)?;

    config.validate().context("Invalid configuration")?;
    info!("Starting AI Council");

    match &cli.command {
        Command::Ask(args) => run_ask(&cli, args, &config).await,
        Command::Models => run_models(&config),
        Command::Serve(args) => run_serve(args, &config).await,
        Command::Mcp => run_mcp(&config).await,
        Command::Config => run_config(&cli, &config),
    }
}

/// Verbosity picks the default filter; `RUST_LOG` overrides it.
fn init_tracing(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let (file_layer, guard) = match &config.logging.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path
                .file_name()
                .context("logging.log_file must name a file")?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(file_layer)
        .init();

    Ok(guard)
}

/// === Dependency Injection ===
fn build_use_case(config: &FileConfig) -> Result<AskCouncilUseCase> {
    let registry = build_registry(&config.providers).context("Failed to build HTTP client")?;

    let cache = if config.cache.enabled {
        let mut cache = ResultCache::new(config.cache.ttl());
        if let Some(dir) = &config.cache.durable_dir {
            match FileCacheStore::open(dir) {
                Ok(store) => {
                    info!("Durable cache tier: {} ({})", store.name(), dir.display());
                    cache = cache.with_durable(Arc::new(store));
                }
                Err(e) => warn!("Durable cache unavailable at {}: {}", dir.display(), e),
            }
        }
        cache
    } else {
        ResultCache::disabled()
    };

    let conversation_logger: Arc<dyn ConversationLogger> =
        match config.logging.conversation_log.as_deref() {
            Some(path) => match JsonlConversationLogger::open(path) {
                Some(logger) => {
                    info!("Conversation log: {}", logger.path().display());
                    Arc::new(logger)
                }
                None => Arc::new(NoConversationLogger),
            },
            None => Arc::new(NoConversationLogger),
        };

    Ok(AskCouncilUseCase::new(Arc::new(registry), Arc::new(cache))
        .with_settings(config.council.to_settings())
        .with_conversation_logger(conversation_logger))
}

async fn run_ask(cli: &Cli, args: &AskArgs, config: &FileConfig) -> Result<()> {
    let use_case = build_use_case(config)?;
    let request = args.to_request(use_case.settings());
    request.validate()?;

    let response = if cli.quiet || args.output == OutputFormat::Json {
        use_case.ask(&request).await
    } else {
        let progress = ProgressReporter::new();
        use_case.ask_with_progress(&request, &progress).await
    };

    // Durable writes are detached; finish them before the process exits
    use_case.cache().flush().await;

    let output = match args.output {
        OutputFormat::Text => ConsoleFormatter::format_text(&response),
        OutputFormat::Full => {
            ConsoleFormatter::format_full(request.question.content(), &response)
        }
        OutputFormat::Json => ConsoleFormatter::format_json(&response),
    };
    println!("{}", output);

    Ok(())
}

fn run_models(config: &FileConfig) -> Result<()> {
    let registry = build_registry(&config.providers).context("Failed to build HTTP client")?;
    print!("{}", ConsoleFormatter::format_providers(&registry.readiness()));
    Ok(())
}

async fn run_serve(args: &ServeArgs, config: &FileConfig) -> Result<()> {
    let use_case = Arc::new(build_use_case(config)?);

    let host = args.host.as_deref().unwrap_or(&config.server.host);
    let port = args.port.unwrap_or(config.server.port);
    let addr = format!("{}:{}", host, port);

    let state = AppState::new(
        use_case,
        RateLimiter::per_minute(config.server.rate_limit_per_minute),
    );
    council_presentation::server::serve(state, &addr)
        .await
        .with_context(|| format!("Server error on {}", addr))?;
    Ok(())
}

/// stdout carries the MCP protocol; logs stay on stderr.
async fn run_mcp(config: &FileConfig) -> Result<()> {
    let use_case = Arc::new(build_use_case(config)?);
    council_presentation::mcp::serve_stdio(use_case)
        .await
        .context("MCP server error")?;
    Ok(())
}

fn run_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (highest priority first):");
    if cli.no_config {
        println!("  (config files disabled by --no-config)");
    } else {
        for line in ConfigLoader::describe_sources(cli.config.as_deref()) {
            println!("{}", line);
        }
    }

    println!();
    println!("Effective configuration:");
    let shown = FileConfig {
        providers: config.providers.redacted(),
        ..config.clone()
    };
    println!(
        "{}",
        toml::to_string_pretty(&shown).context("Failed to render configuration")?
    );
    Ok(())
}

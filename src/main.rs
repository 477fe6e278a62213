//! Main entry point for the Translate Relay CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use translate_relay::cli::commands;
use translate_relay::{Dispatcher, GoogleTranslator, LanguagePair, TranslateBackend, TranslatorConfig};

/// Translate text from the command line, stdin, JSON, or over HTTP
#[derive(Parser, Debug)]
#[command(name = "translate-relay", version, about, long_about = None)]
struct Args {
    /// Text to translate (reads stdin when omitted)
    #[arg(long, default_value = "")]
    text: String,

    /// Source language
    #[arg(long)]
    from: Option<String>,

    /// Target language
    #[arg(long)]
    to: Option<String>,

    /// Read a JSON request from stdin and write a JSON response
    #[arg(long)]
    json: bool,

    /// Treat --text as a comma-separated list
    #[arg(long)]
    batch: bool,

    /// Split long text into sentences and translate them as a batch
    #[arg(long)]
    split: bool,

    /// Run as HTTP server
    #[arg(long)]
    server: bool,

    /// Bind address for the HTTP server
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Listen port for the HTTP server
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Maximum concurrent backend calls per batch
    #[arg(long)]
    workers: Option<usize>,

    /// Per-item deadline on the HTTP path, in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Load configuration from a JSON file instead of the environment
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr; stdout carries translations
    let log_level = if args.verbose {
        "debug"
    } else if args.server {
        "info"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}={}", env!("CARGO_CRATE_NAME"), log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => TranslatorConfig::from_file(path)?,
        None => TranslatorConfig::from_env()?,
    };
    if let Some(workers) = args.workers {
        config.max_workers = workers;
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }
    config.validate()?;

    let backend: Arc<dyn TranslateBackend> = Arc::new(GoogleTranslator::new(&config)?);

    if args.server {
        commands::handle_server(args.host, args.port, backend, config).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let dispatcher = Dispatcher::from_config(backend, &config);
    let languages = LanguagePair::new(
        args.from.unwrap_or_else(|| config.default_from.clone()),
        args.to.unwrap_or_else(|| config.default_to.clone()),
    );
    // Unlocked handles: pool workers log to stderr while a batch is running
    let (mut out, mut err) = (io::stdout(), io::stderr());

    let code = if args.json {
        let input = commands::read_stdin().await?;
        commands::handle_json(&dispatcher, &input, &config, &mut out).await?
    } else if args.batch && !args.text.is_empty() {
        commands::handle_batch(&dispatcher, &args.text, &languages, &mut out, &mut err).await?
    } else {
        let text = if args.text.is_empty() {
            commands::read_stdin().await?
        } else {
            args.text
        };

        commands::handle_text(
            &dispatcher,
            &text,
            args.split,
            config.max_segment_chars,
            &languages,
            &mut out,
            &mut err,
        )
        .await?
    };

    Ok(ExitCode::from(code))
}

//! poker-coach: placeholder coaching service for the poker trainer.
//!
//! This is the application entry point. It initializes tracing, loads configuration
//! from an optional TOML file, builds the Axum router and starts the HTTP server.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use poker_coach::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use poker_coach::http::start_server;
use poker_coach::routes::create_router;

/// poker-coach: coaching API for the poker trainer
#[derive(Parser, Debug)]
#[command(name = "poker-coach", version, about)]
struct Args {
    /// Path to configuration file (defaults apply when the default path is absent)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level filter (e.g., "poker_coach=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Address to listen on, overriding http.host
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding http.port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Tracing is not initialized yet when configuration fails
            eprintln!("poker-coach: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), poker_coach::Error> {

    // An explicit path must exist; the default path is optional
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::load_or_default(DEFAULT_CONFIG_PATH)?,
    };

    if let Some(host) = args.host {
        config.http.host = host;
    }
    if let Some(port) = args.port {
        config.http.port = port;
    }

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(
        host = %config.http.host,
        port = config.http.port,
        origins = ?config.cors.allowed_origins,
        "Loaded configuration"
    );

    let app = create_router(&config);
    start_server(app, &config.http).await?;

    Ok(())
}

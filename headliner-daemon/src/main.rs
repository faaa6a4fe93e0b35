//! Headliner daemon - newsletter title suggestions over HTTP.
//!
//! Receives `{ "context": ... }`, asks an OpenAI-compatible chat model for
//! twenty titles, and returns `{ "titles": [...] }`.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use headliner_daemon::config::{DaemonConfig, CONFIG_FILE_NAME};
use headliner_daemon::{create_router, AppState, OpenAiClient};

/// Newsletter title generation daemon
#[derive(Parser, Debug)]
#[command(name = "headliner-daemon")]
#[command(about = "Newsletter title generation daemon")]
#[command(version)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = CONFIG_FILE_NAME)]
    config: PathBuf,

    /// Address to bind (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// HTTP port to listen on (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Chat model name (overrides config)
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the OpenAI-compatible API (overrides config)
    #[arg(long)]
    api_base: Option<String>,

    /// Fail on configuration file errors instead of using defaults
    #[arg(long)]
    strict: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .init();

    let mut config = if cli.strict {
        DaemonConfig::try_load(&cli.config)?.unwrap_or_default()
    } else {
        DaemonConfig::load(&cli.config)
    };

    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(model) = cli.model {
        config.openai.model = model;
    }
    if let Some(api_base) = cli.api_base {
        config.openai.api_base = api_base;
    }

    let api_key = config.api_key();
    if api_key.is_none() {
        // Requests will fail with a configuration error until the key is set.
        warn!(
            "{} is not set; title requests will fail",
            config.openai.api_key_env
        );
    }

    info!("Model: {}", config.openai.model);
    info!("Upstream: {}", config.openai.api_base);

    let state = AppState::new(OpenAiClient::new(&config.openai, api_key));
    let router = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Headliner daemon listening on http://{}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Headliner daemon stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

//! Headliner CLI - newsletter title suggestions in the terminal
//!
//! Describe a newsletter, get twenty title ideas back from the Headliner
//! daemon, copy the one you like.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod client;
mod clipboard;
mod commands;
mod config;
mod constants;
mod generator;
mod output;
mod session;

use commands::*;
use config::HeadlinerConfig;
use output::OutputFormat;
use session::SessionStore;

/// Newsletter title suggestions from a short description.
#[derive(Parser)]
#[command(name = "headliner")]
#[command(author, version)]
#[command(about = "Newsletter title suggestions from a short description")]
#[command(propagate_version = true)]
#[command(after_help = "Quick Start:
  headliner login --token <TOKEN>      Sign in
  headliner generate                   Interactive generator
  headliner generate \"rust for kids\"   One-shot, prints 20 titles
  headliner status                     Check session and daemon")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Daemon base URL (overrides config)
    #[arg(long, global = true, env = "HEADLINER_SERVER")]
    server: Option<String>,

    /// Session file location (overrides config)
    #[arg(long, global = true, env = "HEADLINER_SESSION_FILE")]
    session_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate newsletter titles (interactive when no context is given)
    #[command(visible_alias = "g")]
    Generate {
        /// What the newsletter is about: topic, audience, style, tone
        context: Option<String>,

        /// Copy title number N to the clipboard after generating
        #[arg(short, long, value_name = "N", value_parser = generate::parse_title_index)]
        copy: Option<usize>,
    },

    /// Store a session from the auth provider
    Login {
        /// Access token (prompted for when omitted)
        #[arg(long)]
        token: Option<String>,

        /// Account email, shown in status
        #[arg(long)]
        email: Option<String>,
    },

    /// Remove the stored session
    Logout,

    /// Show session state and daemon health
    #[command(visible_alias = "st")]
    Status,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .headlinerrc.toml
    let config = HeadlinerConfig::load(std::path::Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }

    let command = match cli.command {
        Some(cmd) => cmd,
        None => {
            let _ = Cli::command().print_help();
            println!();
            return Ok(());
        }
    };

    let session_file = config
        .session_file(cli.session_file.as_deref())
        .context("No session file location; pass --session-file or set HEADLINER_SESSION_FILE")?;

    let ctx = CommandContext {
        server_url: config.server_url(cli.server.as_deref()),
        session: SessionStore::new(session_file),
        format,
    };

    match command {
        Commands::Generate { context, copy } => generate::run(&ctx, context, copy).await,
        Commands::Login { token, email } => login::run(&ctx, token, email),
        Commands::Logout => logout::run(&ctx),
        Commands::Status => status::run(&ctx).await,
    }
}

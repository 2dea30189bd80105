// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! ytdata CLI - channel, video and playlist data from the YouTube Data API.
//!
//! # Examples
//!
//! ```bash
//! # Channels whose name is exactly one of the keywords
//! ytdata search exact -k "Rust" -k "Tokio"
//!
//! # Channels behind last week's most viewed videos
//! ytdata search ranking -k "rust tutorial" --timeframe 7 --order view-count
//!
//! # Properties and transcripts of each channel's 10 latest uploads
//! ytdata collect channels UC_x5XG1OV2P6uZZ5FSM9Ttw --max-videos 10
//!
//! # Today's statistics for a list of videos, as JSON
//! ytdata collect videos --ids-file ids.txt --statistics --no-properties \
//!     --no-transcript --stream statistics --format json --pretty
//! ```

mod commands;
mod input;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use ytdata_collect::CollectError;
use ytdata_core::CoreError;
use ytdata_fetch::FetchError;
use ytdata_store::{Config, StoreError};

use commands::{channel, collect, config, playlist, search};

// ============================================================================
// CLI Definition
// ============================================================================

/// ytdata CLI - YouTube Data API collection.
#[derive(Parser)]
#[command(name = "ytdata")]
#[command(about = "Collect channel, video and playlist data from the YouTube Data API")]
#[command(long_about = r#"
ytdata searches YouTube and collects per-video data through the Data API v3.

The API key is read from the environment variable named in the config
file (YOUTUBE_API_KEY by default).

Examples:
  ytdata search exact -k "Acme"             # Channel named exactly Acme
  ytdata channel info UC...                 # Name, uploads playlist, subscribers
  ytdata collect channels UC... --statistics
  ytdata config init                        # Write a default config file
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Config file to use instead of the default location.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (no logs, no summaries).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Keyword search.
    #[command(visible_alias = "s")]
    Search(search::SearchArgs),

    /// Channel lookups.
    Channel(channel::ChannelArgs),

    /// Playlist traversal.
    Playlist(playlist::PlaylistArgs),

    /// Batch collection of per-video data.
    #[command(visible_alias = "c")]
    Collect(collect::CollectArgs),

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Tab-separated rows under a header.
    #[default]
    Text,
    /// JSON for scripting.
    Json,
}

/// CLI exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
    /// Configuration, credential or unsupported-option error.
    Config = 2,
    /// Finished, but some items failed.
    Partial = 3,
}

impl ExitCode {
    /// Picks the exit code for a failed command.
    pub fn for_error(err: &anyhow::Error) -> Self {
        if let Some(e) = err.downcast_ref::<CollectError>() {
            return if e.is_config() {
                Self::Config
            } else {
                Self::Error
            };
        }
        if let Some(e) = err.downcast_ref::<FetchError>() {
            return match e {
                FetchError::MissingApiKey(_)
                | FetchError::InvalidApiKey
                | FetchError::InvalidUrl(_)
                | FetchError::DomainNotAllowed(_) => Self::Config,
                _ => Self::Error,
            };
        }
        if let Some(e) = err.downcast_ref::<CoreError>() {
            return match e {
                CoreError::InvalidConfig(_) | CoreError::NotImplemented(_) => Self::Config,
                _ => Self::Error,
            };
        }
        if err.downcast_ref::<StoreError>().is_some() {
            return Self::Config;
        }
        Self::Error
    }
}

// ============================================================================
// Logging Setup
// ============================================================================

/// The configuration file this run reads: `--config` or the default path.
pub(crate) fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

fn setup_logging(verbose: bool, quiet: bool, no_color: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = if verbose {
        EnvFilter::new("ytdata=debug,info")
    } else {
        EnvFilter::new(format!("ytdata={level}"))
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_ansi(!no_color)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_file = config_path(&cli);
    let config = match Config::load_from(&config_file) {
        Ok(config) => config,
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e}");
            }
            std::process::exit(ExitCode::Config as i32);
        }
    };

    setup_logging(cli.verbose, cli.quiet, cli.no_color, &config.general.log_level);
    info!(
        path = %config_file.display(),
        found = config_file.exists(),
        "Configuration loaded"
    );

    let result = match &cli.command {
        Commands::Search(args) => search::run(args, &cli, &config).await,
        Commands::Channel(args) => channel::run(args, &cli, &config).await,
        Commands::Playlist(args) => playlist::run(args, &cli, &config).await,
        Commands::Collect(args) => collect::run(args, &cli, &config).await,
        Commands::Config(args) => config::run(args, &cli, &config),
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::for_error(&e) as i32);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;
use ytdata_store::{Config, StoreError};

use crate::output::JsonFormatter;
use crate::{config_path, Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
pub fn run(args: &ConfigArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(config, cli)?,
        ConfigAction::Path => show_path(cli)?,
        ConfigAction::Init { force } => init_config(*force, cli)?,
    }
    Ok(ExitCode::Success)
}

fn show_config(config: &Config, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Text => {
            println!("ytdata Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("API key variable:     {}", config.api.api_key_env);
            println!("API base URL:         {}", config.api.base_url);
            println!("Watch base URL:       {}", config.api.watch_base_url);
            println!("Timeout:              {}s", config.api.timeout_secs);
            println!();
            println!("Transcripts:          {}", if config.transcripts.enabled { "on" } else { "off" });
            println!("Languages:            {}", config.transcripts.languages.join(", "));
            println!();
            println!("Max videos:           {}", config.collect.max_videos);
            println!("Search max results:   {}", config.collect.search_max_results);
            println!("Ranking timeframe:    {} days", config.collect.timeframe_days);
            println!("Log level:            {}", config.general.log_level);
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(config)?);
        }
    }
    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);
    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "config_file": path.display().to_string(),
                "exists": path.exists(),
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
    }
    Ok(())
}

fn init_config(force: bool, cli: &Cli) -> Result<()> {
    let path = config_path(cli);
    if path.exists() && !force {
        return Err(StoreError::Config(format!(
            "{} already exists; use --force to overwrite",
            path.display()
        ))
        .into());
    }

    Config::default().save_to(&path)?;
    info!(path = %path.display(), "Config initialized");
    println!("Wrote {}", path.display());
    Ok(())
}

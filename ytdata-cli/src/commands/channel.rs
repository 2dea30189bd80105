//! Channel command - channel summaries and uploads.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::warn;
use ytdata_collect::Channel;
use ytdata_core::ChannelId;
use ytdata_store::Config;

use super::connect;
use crate::output::{print_rows, print_summary, VideoIdRow};
use crate::{Cli, ExitCode};

/// Arguments for the channel command.
#[derive(Args)]
pub struct ChannelArgs {
    #[command(subcommand)]
    pub action: ChannelAction,
}

/// Channel subcommands.
#[derive(Subcommand)]
pub enum ChannelAction {
    /// Name, uploads playlist and subscriber count.
    Info {
        /// Channel ids.
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Ids of the most recent uploads.
    Videos {
        /// Channel id.
        id: String,

        /// Number of videos.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
}

/// Runs the channel command.
pub async fn run(args: &ChannelArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let api = connect(config)?;

    match &args.action {
        ChannelAction::Info { ids } => {
            let mut rows = Vec::with_capacity(ids.len());
            let mut failed = 0;
            for id in ids {
                let channel = Channel::new(ChannelId::new(id.as_str()), api.clone());
                match channel.info().await {
                    Ok(info) => rows.push(info),
                    Err(e) if e.is_config() => return Err(e.into()),
                    Err(e) => {
                        failed += 1;
                        warn!(channel_id = %id, error = %e, "Skipping channel");
                    }
                }
            }
            print_rows(&rows, cli)?;

            if failed > 0 {
                print_summary(cli, &format!("{failed} of {} channels failed", ids.len()));
                return Ok(ExitCode::Partial);
            }
            Ok(ExitCode::Success)
        }
        ChannelAction::Videos { id, count } => {
            let channel = Channel::new(ChannelId::new(id.as_str()), api);
            let count = count.unwrap_or(config.collect.max_videos);
            let rows: Vec<VideoIdRow> = channel
                .video_ids(count)
                .await?
                .into_iter()
                .map(|video_id| VideoIdRow { video_id })
                .collect();
            print_rows(&rows, cli)?;
            Ok(ExitCode::Success)
        }
    }
}

//! Playlist command - playlist traversal.

use anyhow::Result;
use clap::{Args, Subcommand};
use ytdata_collect::Playlist;
use ytdata_core::PlaylistId;
use ytdata_store::Config;

use super::connect;
use crate::output::{print_rows, VideoIdRow};
use crate::{Cli, ExitCode};

/// Arguments for the playlist command.
#[derive(Args)]
pub struct PlaylistArgs {
    #[command(subcommand)]
    pub action: PlaylistAction,
}

/// Playlist subcommands.
#[derive(Subcommand)]
pub enum PlaylistAction {
    /// Video ids in playlist order.
    Videos {
        /// Playlist id.
        id: String,

        /// Number of videos.
        #[arg(long, short = 'n')]
        count: Option<usize>,
    },
}

/// Runs the playlist command.
pub async fn run(args: &PlaylistArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &args.action {
        PlaylistAction::Videos { id, count } => {
            let playlist = Playlist::new(PlaylistId::new(id.as_str()), connect(config)?);
            let count = count.unwrap_or(config.collect.max_videos);
            let rows: Vec<VideoIdRow> = playlist
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

//! Collect command - batch per-video data.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, ValueEnum};
use tracing::info;
use ytdata_collect::{
    CollectRequest, CollectSource, CollectionReport, FieldGroups, VideoDataCollector,
};
use ytdata_core::{ChannelId, PlaylistId, VideoId, VideoStatistics};
use ytdata_store::Config;

use super::{connect, transcript_source};
use crate::input::gather;
use crate::output::{print_rows, print_summary, TextFormatter};
use crate::{Cli, ExitCode};

/// Arguments for the collect command.
#[derive(Args)]
pub struct CollectArgs {
    /// What the ids identify.
    #[arg(value_enum)]
    pub source: SourceArg,

    /// Channel, video or playlist ids.
    pub ids: Vec<String>,

    /// File with one id per line.
    #[arg(long)]
    pub ids_file: Option<PathBuf>,

    /// Videos per channel or playlist.
    #[arg(long)]
    pub max_videos: Option<usize>,

    /// Also fetch view, like and comment counts.
    #[arg(long)]
    pub statistics: bool,

    /// Skip transcripts.
    #[arg(long)]
    pub no_transcript: bool,

    /// Skip video properties.
    #[arg(long)]
    pub no_properties: bool,

    /// Which rows to print.
    #[arg(long, value_enum, default_value_t = Stream::Merged)]
    pub stream: Stream,
}

/// Identifier kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Channel ids; their latest uploads are collected.
    Channels,
    /// Video ids.
    Videos,
    /// Playlist ids; their first items are collected.
    Playlists,
}

/// Output stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Stream {
    /// One row per video with every column.
    Merged,
    /// Properties and transcript of videos whose properties were collected.
    Properties,
    /// Statistics of videos whose statistics were collected.
    Statistics,
}

impl CollectArgs {
    fn fields(&self, config: &Config) -> FieldGroups {
        FieldGroups {
            properties: !self.no_properties,
            statistics: self.statistics,
            transcript: !self.no_transcript && config.transcripts.enabled,
        }
    }

    fn source(&self, ids: Vec<String>) -> CollectSource {
        match self.source {
            SourceArg::Channels => CollectSource::Channels(ids.into_iter().map(ChannelId::new).collect()),
            SourceArg::Videos => CollectSource::Videos(ids.into_iter().map(VideoId::new).collect()),
            SourceArg::Playlists => {
                CollectSource::Playlists(ids.into_iter().map(PlaylistId::new).collect())
            }
        }
    }
}

/// Runs the collect command.
pub async fn run(args: &CollectArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let ids = gather(&args.ids, args.ids_file.as_deref())?;
    let fields = args.fields(config);
    let request = CollectRequest::new(args.source(ids), fields)
        .with_max_videos(args.max_videos.unwrap_or(config.collect.max_videos));

    let api = connect(config)?;
    let transcripts = if fields.transcript {
        Some(transcript_source(config)?)
    } else {
        None
    };

    info!(
        source = ?args.source,
        ids = request.source.len(),
        max_videos = request.max_videos,
        "Starting collection"
    );
    let report = VideoDataCollector::new(api, transcripts)
        .collect(&request)
        .await?;

    print_stream(&report, args.stream, cli)?;
    print_summary(cli, &TextFormatter::new(!cli.no_color).collection_summary(&report));

    if report.has_errors() {
        Ok(ExitCode::Partial)
    } else {
        Ok(ExitCode::Success)
    }
}

fn print_stream(report: &CollectionReport, stream: Stream, cli: &Cli) -> Result<()> {
    match stream {
        Stream::Merged => print_rows(&report.records, cli),
        Stream::Properties => {
            let rows: Vec<_> = report.properties_rows().collect();
            print_rows(&rows, cli)
        }
        Stream::Statistics => {
            let rows: Vec<VideoStatistics> = report.statistics_rows().cloned().collect();
            print_rows(&rows, cli)
        }
    }
}

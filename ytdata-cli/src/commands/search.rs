//! Search command - keyword search and channel discovery.

use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand, ValueEnum};
use tracing::info;
use ytdata_collect::{SearchHit, YouTubeSearch};
use ytdata_core::{CoreError, ResultKind, SearchOrder};
use ytdata_store::Config;

use super::connect;
use crate::input::gather;
use crate::output::{print_rows, print_summary, ChannelIdRow, ChannelRow, HitRow, TextFormatter};
use crate::{Cli, ExitCode};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    #[command(subcommand)]
    pub action: SearchAction,
}

/// Keywords, inline or from a file.
#[derive(Args)]
pub struct KeywordArgs {
    /// Search keyword (repeatable).
    #[arg(long = "keyword", short = 'k')]
    pub keywords: Vec<String>,

    /// File with one keyword per line.
    #[arg(long)]
    pub keywords_file: Option<PathBuf>,
}

/// Search subcommands.
#[derive(Subcommand)]
pub enum SearchAction {
    /// Channels whose name equals a keyword, ignoring case.
    Exact {
        #[command(flatten)]
        keywords: KeywordArgs,
    },

    /// Raw search hits for each keyword.
    Run {
        #[command(flatten)]
        keywords: KeywordArgs,

        /// Result type: video or channel.
        #[arg(long = "type", short = 't', default_value = "video")]
        kind: String,

        /// Results per keyword.
        #[arg(long)]
        max_results: Option<u32>,

        /// Result ordering.
        #[arg(long, value_enum, default_value_t = OrderArg::Relevance)]
        order: OrderArg,

        /// Only results published after this RFC 3339 instant.
        #[arg(long)]
        published_after: Option<String>,
    },

    /// Channels behind the best-performing recent videos.
    Ranking {
        #[command(flatten)]
        keywords: KeywordArgs,

        /// Videos per keyword.
        #[arg(long)]
        max_results: Option<u32>,

        /// Look-back window in days.
        #[arg(long)]
        timeframe: Option<u32>,

        /// Video ordering.
        #[arg(long, value_enum, default_value_t = OrderArg::ViewCount)]
        order: OrderArg,

        /// Keep repeated channels.
        #[arg(long)]
        keep_duplicates: bool,
    },
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    /// Highest view count first.
    ViewCount,
    /// Relevance score.
    Relevance,
    /// Newest first.
    Date,
}

impl From<OrderArg> for SearchOrder {
    fn from(order: OrderArg) -> Self {
        match order {
            OrderArg::ViewCount => SearchOrder::ViewCount,
            OrderArg::Relevance => SearchOrder::Relevance,
            OrderArg::Date => SearchOrder::Date,
        }
    }
}

/// Runs the search command.
pub async fn run(args: &SearchArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    match &args.action {
        SearchAction::Exact { keywords } => exact(keywords, cli, config).await,
        SearchAction::Run {
            keywords,
            kind,
            max_results,
            order,
            published_after,
        } => {
            let kind: ResultKind = kind.parse()?;
            let cutoff = published_after.as_deref().map(parse_instant).transpose()?;
            let max_results = max_results.unwrap_or(config.collect.search_max_results);
            raw(keywords, kind, max_results, cutoff, (*order).into(), cli, config).await
        }
        SearchAction::Ranking {
            keywords,
            max_results,
            timeframe,
            order,
            keep_duplicates,
        } => {
            let max_results = max_results.unwrap_or(config.collect.search_max_results);
            let timeframe = timeframe.unwrap_or(config.collect.timeframe_days);
            ranking(keywords, max_results, timeframe, (*order).into(), !keep_duplicates, cli, config)
                .await
        }
    }
}

fn parse_instant(raw: &str) -> Result<DateTime<Utc>, CoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| CoreError::InvalidConfig(format!("--published-after {raw:?}: {e}")))
}

fn searcher(keywords: &KeywordArgs, config: &Config) -> Result<YouTubeSearch> {
    let keywords = gather(&keywords.keywords, keywords.keywords_file.as_deref())?;
    let api = connect(config)?;
    Ok(YouTubeSearch::new(api, keywords)?)
}

async fn exact(keywords: &KeywordArgs, cli: &Cli, config: &Config) -> Result<ExitCode> {
    let search = searcher(keywords, config)?;
    let matches = search.collect_exact_terms().await?;

    let mut rows = Vec::with_capacity(matches.channels.len());
    for channel in &matches.channels {
        rows.push(ChannelRow {
            channel_id: channel.id().clone(),
            channel_name: channel.name().await?.to_string(),
        });
    }
    print_rows(&rows, cli)?;

    if let Some(line) = TextFormatter::new(false).unmatched_keywords(&matches.not_found) {
        print_summary(cli, &line);
    }
    Ok(ExitCode::Success)
}

async fn raw(
    keywords: &KeywordArgs,
    kind: ResultKind,
    max_results: u32,
    published_after: Option<DateTime<Utc>>,
    order: SearchOrder,
    cli: &Cli,
    config: &Config,
) -> Result<ExitCode> {
    let search = searcher(keywords, config)?;
    let hits = search.execute(kind, max_results, published_after, order).await?;

    let mut rows = Vec::with_capacity(hits.len());
    for hit in &hits {
        let row = match hit {
            SearchHit::Video(video) => HitRow {
                kind: hit.kind(),
                id: hit.id().to_string(),
                title: video.name().await?.to_string(),
                channel_id: video.channel_id().await?.to_string(),
            },
            SearchHit::Channel(channel) => HitRow {
                kind: hit.kind(),
                id: hit.id().to_string(),
                title: channel.name().await?.to_string(),
                channel_id: channel.id().to_string(),
            },
        };
        rows.push(row);
    }

    info!(hits = rows.len(), "Printing search hits");
    print_rows(&rows, cli)?;
    Ok(ExitCode::Success)
}

async fn ranking(
    keywords: &KeywordArgs,
    max_results: u32,
    timeframe_days: u32,
    order: SearchOrder,
    only_unique: bool,
    cli: &Cli,
    config: &Config,
) -> Result<ExitCode> {
    let search = searcher(keywords, config)?;
    let channels = search
        .collect_best_ranking_channels(max_results, timeframe_days, order, only_unique)
        .await?;

    let rows: Vec<ChannelIdRow> = channels
        .iter()
        .map(|c| ChannelIdRow { channel_id: c.id().clone() })
        .collect();
    print_rows(&rows, cli)?;
    Ok(ExitCode::Success)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant() {
        let dt = parse_instant("2024-05-01T12:00:00+02:00").unwrap();
        assert_eq!(dt.to_rfc3339(), "2024-05-01T10:00:00+00:00");
        assert!(matches!(parse_instant("yesterday"), Err(CoreError::InvalidConfig(_))));
    }

    #[test]
    fn test_order_mapping() {
        assert_eq!(SearchOrder::from(OrderArg::ViewCount), SearchOrder::ViewCount);
        assert_eq!(SearchOrder::from(OrderArg::Date).as_str(), "date");
    }
}

//! Caption transcripts from the public watch page.
//!
//! The watch page embeds the player response, whose `captions` block lists
//! the available caption tracks. A chosen track's `baseUrl` serves the
//! timed-text XML, which is flattened into one line of text.

use std::sync::LazyLock;

use async_trait::async_trait;
use quick_xml::events::{BytesText, Event};
use quick_xml::reader::Reader;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use ytdata_core::{TranscriptOutcome, TranscriptSource, VideoId};

use crate::error::FetchError;
use crate::http::{HttpClient, ResponseExt};
use crate::settings::FetchSettings;

static PLAYABILITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""playabilityStatus":\s*\{\s*"status":\s*"([A-Z_]+)""#)
        .unwrap_or_else(|e| panic!("playability pattern must compile: {e}"))
});

const CAPTIONS_MARKER: &str = r#""captions":"#;

// ============================================================================
// Watch Page Parsing
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionsBlock {
    #[serde(default)]
    player_captions_tracklist_renderer: Option<Tracklist>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Tracklist {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

/// One entry of `captionTracks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CaptionTrack {
    pub base_url: String,
    pub language_code: String,
    /// `"asr"` for auto-generated tracks.
    #[serde(default)]
    pub kind: Option<String>,
}

impl CaptionTrack {
    fn is_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }
}

/// What the watch page says about captions.
#[derive(Debug)]
pub(crate) enum WatchPage {
    /// The video has caption tracks.
    Tracks(Vec<CaptionTrack>),
    /// No track to download; the outcome is already decided.
    Settled(TranscriptOutcome),
}

pub(crate) fn parse_watch_page(html: &str) -> WatchPage {
    if html.contains(r#"class="g-recaptcha""#) {
        return WatchPage::Settled(TranscriptOutcome::TransientError(
            "watch page answered with a captcha".to_string(),
        ));
    }

    match PLAYABILITY_RE.captures(html) {
        Some(caps) if &caps[1] == "OK" => {}
        _ => return WatchPage::Settled(TranscriptOutcome::Unavailable),
    }

    let Some(start) = html.find(CAPTIONS_MARKER) else {
        return WatchPage::Settled(TranscriptOutcome::Disabled);
    };

    let rest = &html[start + CAPTIONS_MARKER.len()..];
    let mut de = serde_json::Deserializer::from_str(rest);
    let block = match CaptionsBlock::deserialize(&mut de) {
        Ok(block) => block,
        Err(e) => {
            return WatchPage::Settled(TranscriptOutcome::TransientError(format!(
                "unreadable caption metadata: {e}"
            )));
        }
    };

    match block.player_captions_tracklist_renderer {
        Some(list) if !list.caption_tracks.is_empty() => WatchPage::Tracks(list.caption_tracks),
        _ => WatchPage::Settled(TranscriptOutcome::Disabled),
    }
}

/// Picks a track: manual tracks in preference order first, then
/// auto-generated ones. An empty preference list accepts any language.
pub(crate) fn choose_track<'a>(
    tracks: &'a [CaptionTrack],
    languages: &[String],
) -> Option<&'a CaptionTrack> {
    let accepts = |track: &CaptionTrack, lang: Option<&String>| match lang {
        Some(lang) => track.language_code.eq_ignore_ascii_case(lang),
        None => true,
    };

    let preferences: Vec<Option<&String>> = if languages.is_empty() {
        vec![None]
    } else {
        languages.iter().map(Some).collect()
    };

    [false, true].into_iter().find_map(|generated| {
        preferences.iter().find_map(|lang| {
            tracks
                .iter()
                .find(|t| t.is_generated() == generated && accepts(*t, *lang))
        })
    })
}

// ============================================================================
// Timed Text
// ============================================================================

/// Entity-decodes a text event, keeping the raw bytes when a reference
/// is unknown or malformed.
fn text_content(text: &BytesText<'_>) -> String {
    match text.unescape() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => String::from_utf8_lossy(text).into_owned(),
    }
}

/// Reads `fragment` as markup and keeps only its decoded text.
///
/// Segment bodies are escaped twice by the server, so after the first
/// decode they may still hold references and inline `<font>` markup.
/// Text that does not read as markup is returned unchanged.
fn plain_text(fragment: &str) -> String {
    let mut reader = Reader::from_str(fragment);
    let mut parts = Vec::new();
    loop {
        match reader.read_event() {
            Ok(Event::Text(e)) => parts.push(text_content(&e)),
            Ok(Event::CData(e)) => parts.push(String::from_utf8_lossy(&e).into_owned()),
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(_) => return fragment.to_string(),
        }
    }
    parts.join(" ")
}

/// Flattens timed-text XML into space-separated text.
///
/// Each `<text>` segment is decoded twice, stripped of inline markup and
/// whitespace-collapsed. Empty segments are dropped.
pub(crate) fn parse_timed_text(xml: &str) -> Result<String, FetchError> {
    let mut reader = Reader::from_str(xml);
    let mut lines = Vec::new();
    let mut segment: Option<Vec<String>> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"text" => segment = Some(Vec::new()),
            Ok(Event::End(e)) if e.name().as_ref() == b"text" => {
                if let Some(parts) = segment.take() {
                    let decoded = plain_text(&parts.join(" "));
                    let line = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
                    if !line.is_empty() {
                        lines.push(line);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(parts) = segment.as_mut() {
                    parts.push(text_content(&e));
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(FetchError::InvalidResponse(format!(
                    "timed text XML error at {}: {e}",
                    reader.buffer_position()
                )));
            }
        }
    }

    Ok(lines.join(" "))
}

// ============================================================================
// Transcript Source
// ============================================================================

/// [`TranscriptSource`] backed by the watch page and timed-text endpoint.
#[derive(Debug, Clone)]
pub struct HttpTranscriptSource {
    http: HttpClient,
    watch_base_url: String,
    languages: Vec<String>,
}

impl HttpTranscriptSource {
    /// Creates a transcript source from settings.
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let http = HttpClient::new(settings.timeout)?
            .with_allowed_domains(settings.allowed_domains()?);

        Ok(Self {
            http,
            watch_base_url: settings.watch_base_url.clone(),
            languages: settings.transcript_languages.clone(),
        })
    }

    fn absolute(&self, url: &str) -> String {
        if url.starts_with('/') {
            format!("{}{}", self.watch_base_url, url)
        } else {
            url.to_string()
        }
    }

    #[instrument(skip(self), fields(video_id = %id))]
    async fn lookup(&self, id: &VideoId) -> Result<TranscriptOutcome, FetchError> {
        let url = format!("{}/watch", self.watch_base_url);
        let response = self
            .http
            .get_query(&url, &[("v", id.transcript_key())])
            .await?;

        if response.is_rate_limited() {
            return Ok(TranscriptOutcome::TransientError("watch page rate limited".to_string()));
        }
        if !response.status().is_success() {
            return Ok(TranscriptOutcome::TransientError(format!(
                "watch page returned {}",
                response.status()
            )));
        }

        let html = response.text().await?;
        let tracks = match parse_watch_page(&html) {
            WatchPage::Tracks(tracks) => tracks,
            WatchPage::Settled(outcome) => return Ok(outcome),
        };

        let Some(track) = choose_track(&tracks, &self.languages) else {
            debug!(available = tracks.len(), "No caption track in a preferred language");
            return Ok(TranscriptOutcome::NotFound);
        };
        debug!(
            language = %track.language_code,
            generated = track.is_generated(),
            "Caption track chosen"
        );

        let response = self.http.get(&self.absolute(&track.base_url)).await?;
        if response.is_rate_limited() {
            return Ok(TranscriptOutcome::TransientError("timed text rate limited".to_string()));
        }
        if !response.status().is_success() {
            return Ok(TranscriptOutcome::TransientError(format!(
                "timed text returned {}",
                response.status()
            )));
        }

        let text = match parse_timed_text(&response.text().await?) {
            Ok(text) => text,
            Err(e) => return Ok(TranscriptOutcome::TransientError(e.to_string())),
        };
        if text.is_empty() {
            return Ok(TranscriptOutcome::NotFound);
        }
        Ok(TranscriptOutcome::Text(text))
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptSource {
    async fn fetch_transcript(&self, id: &VideoId) -> TranscriptOutcome {
        match self.lookup(id).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(video_id = %id, error = %e, "Transcript lookup failed");
                TranscriptOutcome::TransientError(e.to_string())
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

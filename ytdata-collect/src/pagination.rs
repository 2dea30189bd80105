//! Playlist traversal across continuation tokens.

use tracing::debug;
use ytdata_core::{CoreError, PlaylistId, PlaylistItemResource, VideoId, YouTubeApi};

use crate::error::CollectError;

/// Largest page the playlist endpoint serves.
pub const PAGE_SIZE_CEILING: u32 = 50;

/// One page of a playlist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistPage {
    /// Video ids on this page, in playlist order.
    pub video_ids: Vec<VideoId>,
    /// Token for the following page, if any.
    pub next_page_token: Option<String>,
    /// Items the API returned, including those without a video id.
    pub item_count: usize,
}

impl PlaylistPage {
    /// True when there is nothing after this page.
    ///
    /// A page whose items all lack a video id is not the end as long as
    /// the API hands out a continuation token.
    pub fn is_last(&self) -> bool {
        self.next_page_token.is_none() || self.item_count == 0
    }
}

/// Fetches a single page of at most `max_results` items.
///
/// Items without a video id (deleted or private entries) are skipped.
pub async fn fetch_page(
    api: &dyn YouTubeApi,
    playlist_id: &PlaylistId,
    max_results: u32,
    page_token: Option<&str>,
) -> Result<PlaylistPage, CoreError> {
    let response = api
        .fetch_playlist_page(playlist_id, max_results, page_token)
        .await?;

    let video_ids = response
        .items
        .iter()
        .filter_map(PlaylistItemResource::video_id)
        .map(VideoId::new)
        .collect();

    Ok(PlaylistPage {
        video_ids,
        next_page_token: response.next_page_token,
        item_count: response.items.len(),
    })
}

/// Collects up to `count` video ids from a playlist, in playlist order.
///
/// Pages are requested sequentially with at most [`PAGE_SIZE_CEILING`]
/// items each. The traversal ends when `count` ids are collected, when a
/// page has no continuation token, or when the API returns no items. A
/// `count` of zero makes no request. Asking for more than the playlist
/// holds returns what exists.
///
/// A failing page aborts the traversal with [`CollectError::PageFetch`].
pub async fn collect_playlist_video_ids(
    api: &dyn YouTubeApi,
    playlist_id: &PlaylistId,
    count: usize,
) -> Result<Vec<VideoId>, CollectError> {
    let mut ids: Vec<VideoId> = Vec::new();
    let mut token: Option<String> = None;
    let mut page = 0;

    while ids.len() < count {
        page += 1;
        let remaining = count - ids.len();
        let chunk = u32::try_from(remaining).map_or(PAGE_SIZE_CEILING, |r| r.min(PAGE_SIZE_CEILING));

        let fetched = fetch_page(api, playlist_id, chunk, token.as_deref())
            .await
            .map_err(|source| CollectError::PageFetch {
                playlist_id: playlist_id.clone(),
                page,
                source,
            })?;

        debug!(
            playlist_id = %playlist_id,
            page,
            requested = chunk,
            received = fetched.video_ids.len(),
            "Playlist page fetched"
        );

        let last = fetched.is_last();
        ids.extend(fetched.video_ids.into_iter().take(remaining));

        if last {
            break;
        }
        token = fetched.next_page_token;
    }

    Ok(ids)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, FakeApi};

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("v{i}")).collect()
    }

    fn api_with(n: usize) -> FakeApi {
        let videos = ids(n);
        let refs: Vec<&str> = videos.iter().map(String::as_str).collect();
        FakeApi::new().with_playlist("PL", &refs)
    }

    fn page_sizes(api: &FakeApi) -> Vec<u32> {
        api.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Page { max_results, .. } => Some(max_results),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_zero_count_makes_no_calls() {
        let api = api_with(10);
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 0)
            .await
            .unwrap();
        assert!(result.is_empty());
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn test_exact_count_across_pages() {
        let api = api_with(120);
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 120)
            .await
            .unwrap();
        assert_eq!(result.len(), 120);
        assert_eq!(result[0].as_str(), "v0");
        assert_eq!(result[119].as_str(), "v119");
        assert_eq!(page_sizes(&api), vec![50, 50, 20]);
    }

    #[tokio::test]
    async fn test_tokens_are_threaded() {
        let api = api_with(75);
        collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 75)
            .await
            .unwrap();
        let tokens: Vec<Option<String>> = api
            .calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Page { token, .. } => Some(token),
                _ => None,
            })
            .collect();
        assert_eq!(tokens, vec![None, Some("50".to_string())]);
    }

    #[tokio::test]
    async fn test_count_beyond_available() {
        let api = api_with(30);
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 100)
            .await
            .unwrap();
        assert_eq!(result.len(), 30);
        assert_eq!(api.call_count(), 1);
    }

    #[tokio::test]
    async fn test_empty_page_stops_traversal() {
        let api = api_with(50).with_dangling_token("PL");
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 200)
            .await
            .unwrap();
        assert_eq!(result.len(), 50);
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_page_without_video_ids_continues() {
        let mut items = vec![""; 50];
        items.extend(["v50", "v51", "v52"]);
        let api = FakeApi::new().with_playlist("PL", &items);
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 60)
            .await
            .unwrap();
        let ids: Vec<&str> = result.iter().map(VideoId::as_str).collect();
        assert_eq!(ids, vec!["v50", "v51", "v52"]);
        assert_eq!(page_sizes(&api), vec![50, 50]);
    }

    #[tokio::test]
    async fn test_small_count_single_request() {
        let api = api_with(120);
        let result = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 7)
            .await
            .unwrap();
        assert_eq!(result.len(), 7);
        assert_eq!(page_sizes(&api), vec![7]);
    }

    #[tokio::test]
    async fn test_page_failure_aborts() {
        let api = api_with(120).failing_page("PL", 2, CoreError::Transport("reset".into()));
        let err = collect_playlist_video_ids(&api, &PlaylistId::new("PL"), 120)
            .await
            .unwrap_err();
        assert!(matches!(err, CollectError::PageFetch { page: 2, .. }));
        assert!(err.is_retryable());
        assert_eq!(api.call_count(), 2);
    }

    #[tokio::test]
    async fn test_single_page_keeps_token() {
        let api = api_with(60);
        let page = fetch_page(&api, &PlaylistId::new("PL"), 50, None).await.unwrap();
        assert_eq!(page.video_ids.len(), 50);
        assert_eq!(page.next_page_token.as_deref(), Some("50"));
        assert!(!page.is_last());
    }
}

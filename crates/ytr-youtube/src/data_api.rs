//! Keyed tier: YouTube Data API v3 `videos` lookup.

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use ytr_models::{parse_iso8601_duration, VideoMetadata, VideoReference};

use crate::config::ResolverConfig;
use crate::error::TierError;

const PARTS: &str = "snippet,contentDetails,statistics";

#[derive(Debug, Deserialize)]
pub(crate) struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VideoItem {
    #[serde(default)]
    pub snippet: Snippet,
    #[serde(default)]
    pub content_details: ContentDetails,
    #[serde(default)]
    pub statistics: Option<Statistics>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Snippet {
    pub title: Option<String>,
    pub channel_title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub published_at: Option<String>,
    pub thumbnails: Option<Thumbnails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnails {
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ContentDetails {
    #[serde(default)]
    pub duration: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Statistics {
    pub view_count: Option<String>,
}

/// Fetch snippet, content details and statistics in one request.
pub(crate) async fn fetch(
    http: &Client,
    config: &ResolverConfig,
    video: &VideoReference,
) -> Result<VideoMetadata, TierError> {
    let api_key = config.api_key.as_deref().ok_or(TierError::NotConfigured)?;

    let response = http
        .get(config.videos_endpoint())
        .query(&[("id", video.as_str()), ("key", api_key), ("part", PARTS)])
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TierError::from_status(response.status()));
    }

    let body: VideoListResponse = response.json().await?;
    let item = body.items.into_iter().next().ok_or(TierError::Empty)?;

    debug!(video_id = %video, "Data API returned metadata");
    Ok(into_metadata(item, video, config))
}

fn into_metadata(item: VideoItem, video: &VideoReference, config: &ResolverConfig) -> VideoMetadata {
    let snippet = item.snippet;

    let thumbnail_url = snippet
        .thumbnails
        .and_then(|t| t.high)
        .map(|t| t.url)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| video.thumbnail_url(config.thumbnail_quality));

    let upload_timestamp = snippet
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let view_count = item
        .statistics
        .and_then(|s| s.view_count)
        .and_then(|v| v.parse::<u64>().ok());

    VideoMetadata {
        id: video.clone(),
        title: snippet.title.unwrap_or_default(),
        duration_seconds: parse_iso8601_duration(&item.content_details.duration),
        thumbnail_url,
        channel_name: snippet.channel_title.unwrap_or_default(),
        description: snippet.description,
        upload_timestamp,
        view_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video() -> VideoReference {
        VideoReference::parse("dQw4w9WgXcQ").unwrap()
    }

    #[test]
    fn test_full_item() {
        let body: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [{
                "snippet": {
                    "title": "Never Gonna Give You Up",
                    "channelTitle": "Rick Astley",
                    "description": "The official video",
                    "publishedAt": "2009-10-25T06:57:33Z",
                    "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"}}
                },
                "contentDetails": {"duration": "PT3M33S"},
                "statistics": {"viewCount": "1500000000"}
            }]
        }))
        .unwrap();

        let item = body.items.into_iter().next().unwrap();
        let meta = into_metadata(item, &video(), &ResolverConfig::default());

        assert_eq!(meta.title, "Never Gonna Give You Up");
        assert_eq!(meta.channel_name, "Rick Astley");
        assert_eq!(meta.duration_seconds, 213);
        assert_eq!(meta.view_count, Some(1_500_000_000));
        assert_eq!(meta.upload_timestamp.to_rfc3339(), "2009-10-25T06:57:33+00:00");
        assert_eq!(meta.thumbnail_url, "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg");
    }

    #[test]
    fn test_sparse_item_synthesizes_thumbnail() {
        let body: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [{"snippet": {"title": "t"}, "contentDetails": {"duration": "P0D"}}]
        }))
        .unwrap();

        let item = body.items.into_iter().next().unwrap();
        let meta = into_metadata(item, &video(), &ResolverConfig::default());

        assert_eq!(meta.duration_seconds, 0);
        assert_eq!(meta.view_count, None);
        assert_eq!(
            meta.thumbnail_url,
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
    }

    #[test]
    fn test_unparseable_view_count_is_absent() {
        let body: VideoListResponse = serde_json::from_value(serde_json::json!({
            "items": [{"statistics": {"viewCount": "lots"}}]
        }))
        .unwrap();
        let item = body.items.into_iter().next().unwrap();
        assert_eq!(into_metadata(item, &video(), &ResolverConfig::default()).view_count, None);
    }

    #[test]
    fn test_missing_items_is_empty_list() {
        let body: VideoListResponse = serde_json::from_str("{}").unwrap();
        assert!(body.items.is_empty());
    }
}

//! Keyless tier: oEmbed title, author and thumbnail.
//!
//! oEmbed carries no duration; the resolver leaves it at zero for the scrape
//! tier to improve.

use chrono::Utc;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::Deserialize;
use ytr_models::video::{UNKNOWN_CHANNEL, UNKNOWN_TITLE};
use ytr_models::{VideoMetadata, VideoReference};

use crate::config::ResolverConfig;
use crate::error::TierError;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OEmbedResponse {
    pub title: Option<String>,
    pub author_name: Option<String>,
    pub thumbnail_url: Option<String>,
}

/// Look up the canonical watch URL through oEmbed.
///
/// A 404 comes back as `TierError::Status(404)` so the caller can tell a
/// missing video apart from an unreachable upstream.
pub(crate) async fn fetch(
    http: &Client,
    config: &ResolverConfig,
    video: &VideoReference,
) -> Result<VideoMetadata, TierError> {
    let watch_url = video.watch_url();

    let response = http
        .get(&config.oembed_url)
        .query(&[("url", watch_url.as_str()), ("format", "json")])
        .header(USER_AGENT, &config.oembed_user_agent)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TierError::from_status(response.status()));
    }

    let body: OEmbedResponse = response.json().await?;
    Ok(into_metadata(body, video, config))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn into_metadata(body: OEmbedResponse, video: &VideoReference, config: &ResolverConfig) -> VideoMetadata {
    VideoMetadata {
        id: video.clone(),
        title: non_empty(body.title).unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        duration_seconds: 0,
        thumbnail_url: non_empty(body.thumbnail_url)
            .unwrap_or_else(|| video.thumbnail_url(config.thumbnail_quality)),
        channel_name: non_empty(body.author_name).unwrap_or_else(|| UNKNOWN_CHANNEL.to_string()),
        description: String::new(),
        upload_timestamp: Utc::now(),
        view_count: None,
    }
}

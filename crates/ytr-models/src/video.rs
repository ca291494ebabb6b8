//! Video metadata returned to clients.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::thumbnail::ThumbnailQuality;
use crate::youtube_url::VideoReference;

/// Title used when the oEmbed source omits one.
pub const UNKNOWN_TITLE: &str = "Unknown Title";
/// Channel used when the oEmbed source omits one.
pub const UNKNOWN_CHANNEL: &str = "Unknown Channel";
/// Title used when every metadata source failed.
pub const UNAVAILABLE_TITLE: &str = "Unable to fetch title";
/// Channel used when every metadata source failed.
pub const UNAVAILABLE_CHANNEL: &str = "Unable to fetch channel";

/// Resolved metadata for a single video.
///
/// Built fresh for every request and never cached. The serialized field
/// names match what the web client already consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VideoMetadata {
    /// 11-character video ID
    pub id: VideoReference,

    pub title: String,

    /// Length in seconds; `0` means unknown
    #[serde(rename = "duration")]
    pub duration_seconds: u64,

    #[serde(rename = "thumbnail")]
    pub thumbnail_url: String,

    #[serde(rename = "channel")]
    pub channel_name: String,

    pub description: String,

    /// Publish time when the source provides it, otherwise resolution time
    #[serde(rename = "uploadDate")]
    pub upload_timestamp: DateTime<Utc>,

    #[serde(rename = "viewCount", skip_serializing_if = "Option::is_none", default)]
    pub view_count: Option<u64>,
}

impl VideoMetadata {
    /// Placeholder metadata used when no upstream answered.
    pub fn unavailable(id: VideoReference, quality: ThumbnailQuality) -> Self {
        Self {
            thumbnail_url: id.thumbnail_url(quality),
            id,
            title: UNAVAILABLE_TITLE.to_string(),
            duration_seconds: 0,
            channel_name: UNAVAILABLE_CHANNEL.to_string(),
            description: String::new(),
            upload_timestamp: Utc::now(),
            view_count: None,
        }
    }

    /// Whether the duration is known.
    pub fn has_duration(&self) -> bool {
        self.duration_seconds > 0
    }
}

//! YouTube URL validation and video reference extraction.
//!
//! Turns untrusted user input into a [`VideoReference`]. The function is pure:
//! no network access, no normalization beyond trimming.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::thumbnail::ThumbnailQuality;

/// Length of a YouTube video ID.
pub const VIDEO_ID_LEN: usize = 11;

/// Inputs longer than this are rejected without pattern matching.
pub const MAX_URL_LENGTH: usize = 2048;

/// Canonical watch page prefix.
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").unwrap());

/// Accepted URL shapes, tried in order. First match wins.
static URL_SHAPES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // Standard watch page
        Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/watch\?v=([A-Za-z0-9_-]{11})").unwrap(),
        // Short link
        Regex::new(r"^(?:https?://)?youtu\.be/([A-Za-z0-9_-]{11})").unwrap(),
        // Embed
        Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/embed/([A-Za-z0-9_-]{11})").unwrap(),
        // Legacy /v/ path
        Regex::new(r"^(?:https?://)?(?:www\.)?youtube\.com/v/([A-Za-z0-9_-]{11})").unwrap(),
        // Mobile
        Regex::new(r"^(?:https?://)?m\.youtube\.com/watch\?v=([A-Za-z0-9_-]{11})").unwrap(),
        // YouTube Music
        Regex::new(r"^(?:https?://)?music\.youtube\.com/watch\?v=([A-Za-z0-9_-]{11})").unwrap(),
    ]
});

/// Errors produced while validating a user-supplied YouTube URL.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlValidationError {
    /// Nothing left after trimming.
    #[error("URL is required")]
    EmptyInput,
    /// Not one of the accepted URL shapes and not a bare ID.
    #[error("Invalid YouTube URL format. Please provide a valid YouTube video URL.")]
    InvalidFormat,
}

/// Result type for URL validation.
pub type UrlValidationResult<T> = Result<T, UrlValidationError>;

/// An 11-character YouTube video ID.
///
/// Only constructed through [`VideoReference::parse`] or
/// [`validate_youtube_url`], so the inner string always matches
/// `^[A-Za-z0-9_-]{11}$`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct VideoReference(String);

impl VideoReference {
    /// Accept `s` only if it is exactly a bare video ID.
    pub fn parse(s: &str) -> Option<Self> {
        BARE_ID.is_match(s).then(|| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch page URL for this video.
    pub fn watch_url(&self) -> String {
        format!("{}{}", WATCH_URL_PREFIX, self.0)
    }

    /// Synthesized thumbnail URL at the given quality.
    pub fn thumbnail_url(&self, quality: ThumbnailQuality) -> String {
        crate::thumbnail::thumbnail_url(self.as_str(), quality)
    }
}

impl fmt::Display for VideoReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for VideoReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for VideoReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        VideoReference::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom("invalid YouTube video ID"))
    }
}

/// Validate a YouTube URL (or bare video ID) and extract the video reference.
///
/// Accepted shapes:
/// - `https://www.youtube.com/watch?v=VIDEO_ID`
/// - `https://youtu.be/VIDEO_ID`
/// - `https://www.youtube.com/embed/VIDEO_ID`
/// - `https://www.youtube.com/v/VIDEO_ID`
/// - `https://m.youtube.com/watch?v=VIDEO_ID`
/// - `https://music.youtube.com/watch?v=VIDEO_ID`
/// - `VIDEO_ID`
///
/// The scheme and `www.` prefix are optional where the original shapes allow
/// them. Trailing query parameters are ignored.
///
/// # Example
/// ```
/// use ytr_models::validate_youtube_url;
///
/// let video = validate_youtube_url("https://youtu.be/dQw4w9WgXcQ?t=30").unwrap();
/// assert_eq!(video.as_str(), "dQw4w9WgXcQ");
/// ```
pub fn validate_youtube_url(input: &str) -> UrlValidationResult<VideoReference> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::EmptyInput);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::InvalidFormat);
    }

    for shape in URL_SHAPES.iter() {
        let Some(captured) = shape.captures(input).and_then(|c| c.get(1)) else {
            continue;
        };
        if let Some(video) = VideoReference::parse(captured.as_str()) {
            return Ok(video);
        }
    }

    VideoReference::parse(input).ok_or(UrlValidationError::InvalidFormat)
}

/// Like [`validate_youtube_url`], discarding the error.
pub fn extract_video_id(input: &str) -> Option<VideoReference> {
    validate_youtube_url(input).ok()
}

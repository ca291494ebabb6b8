//! Resolver configuration.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use url::Url;
use ytr_models::ThumbnailQuality;

use crate::error::{ResolveError, ResolveResult};

/// Default YouTube Data API v3 base.
pub const DEFAULT_DATA_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
/// Default oEmbed endpoint.
pub const DEFAULT_OEMBED_URL: &str = "https://www.youtube.com/oembed";
/// Default watch page endpoint.
pub const DEFAULT_WATCH_BASE: &str = "https://www.youtube.com/watch";

pub const OEMBED_USER_AGENT: &str = "YouTranscript/1.0";
pub const SCRAPE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Metadata resolver configuration.
#[derive(Clone)]
pub struct ResolverConfig {
    /// Data API key. `None` disables the keyed tier.
    pub api_key: Option<String>,
    /// Data API base URL (without `/videos`)
    pub data_api_base: String,
    /// oEmbed endpoint URL
    pub oembed_url: String,
    /// Watch page URL used for the duration scrape
    pub watch_base: String,
    /// Per-call timeout for every upstream request
    pub request_timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
    /// Whether to scrape the watch page when duration is still unknown
    pub scrape_duration: bool,
    /// Quality used when synthesizing thumbnail URLs
    pub thumbnail_quality: ThumbnailQuality,
    pub oembed_user_agent: String,
    pub scrape_user_agent: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            data_api_base: DEFAULT_DATA_API_BASE.to_string(),
            oembed_url: DEFAULT_OEMBED_URL.to_string(),
            watch_base: DEFAULT_WATCH_BASE.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(3),
            scrape_duration: true,
            thumbnail_quality: ThumbnailQuality::Hq,
            oembed_user_agent: OEMBED_USER_AGENT.to_string(),
            scrape_user_agent: SCRAPE_USER_AGENT.to_string(),
        }
    }
}

/// Resolver settings safe to expose on a status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverInfo {
    pub has_api_key: bool,
    pub scrape_duration: bool,
    pub request_timeout_secs: u64,
    pub thumbnail_quality: ThumbnailQuality,
}

// The API key must never reach logs.
impl fmt::Debug for ResolverConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolverConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("data_api_base", &self.data_api_base)
            .field("oembed_url", &self.oembed_url)
            .field("watch_base", &self.watch_base)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("scrape_duration", &self.scrape_duration)
            .field("thumbnail_quality", &self.thumbnail_quality)
            .finish()
    }
}

impl ResolverConfig {
    /// Create config from environment variables.
    pub fn from_env() -> ResolveResult<Self> {
        let defaults = Self::default();

        let api_key = std::env::var("YOUTUBE_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let thumbnail_quality = match std::env::var("YOUTUBE_THUMBNAIL_QUALITY") {
            Ok(raw) => raw.parse::<ThumbnailQuality>().map_err(ResolveError::Config)?,
            Err(_) => defaults.thumbnail_quality,
        };

        let config = Self {
            api_key,
            data_api_base: std::env::var("YOUTUBE_DATA_API_BASE")
                .unwrap_or(defaults.data_api_base),
            oembed_url: std::env::var("YOUTUBE_OEMBED_URL").unwrap_or(defaults.oembed_url),
            watch_base: std::env::var("YOUTUBE_WATCH_BASE").unwrap_or(defaults.watch_base),
            request_timeout: Duration::from_secs(
                std::env::var("YOUTUBE_REQUEST_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(5),
            ),
            connect_timeout: Duration::from_secs(
                std::env::var("YOUTUBE_CONNECT_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(3),
            ),
            scrape_duration: std::env::var("YOUTUBE_SCRAPE_DURATION")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(true),
            thumbnail_quality,
            oembed_user_agent: defaults.oembed_user_agent,
            scrape_user_agent: defaults.scrape_user_agent,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check that every upstream URL parses.
    pub fn validate(&self) -> ResolveResult<()> {
        for (name, value) in [
            ("YOUTUBE_DATA_API_BASE", &self.data_api_base),
            ("YOUTUBE_OEMBED_URL", &self.oembed_url),
            ("YOUTUBE_WATCH_BASE", &self.watch_base),
        ] {
            Url::parse(value)
                .map_err(|e| ResolveError::Config(format!("{} is not a valid URL: {}", name, e)))?;
        }
        Ok(())
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn info(&self) -> ResolverInfo {
        ResolverInfo {
            has_api_key: self.has_api_key(),
            scrape_duration: self.scrape_duration,
            request_timeout_secs: self.request_timeout.as_secs(),
            thumbnail_quality: self.thumbnail_quality,
        }
    }

    /// Full Data API `videos` endpoint.
    pub fn videos_endpoint(&self) -> String {
        format!("{}/videos", self.data_api_base.trim_end_matches('/'))
    }
}

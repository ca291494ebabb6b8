//! Tiered metadata resolution.

use std::fmt;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};
use ytr_models::{VideoMetadata, VideoReference};

use crate::config::{ResolverConfig, ResolverInfo};
use crate::error::{ResolveError, ResolveResult, TierError};
use crate::{data_api, metrics, oembed, scrape};

/// One upstream source in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    DataApi,
    OEmbed,
    PageScrape,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::DataApi => "data_api",
            Tier::OEmbed => "oembed",
            Tier::PageScrape => "page_scrape",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened when a tier was considered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Succeeded,
    /// Not attempted (no key, scrape disabled, duration already known, video confirmed missing)
    Skipped,
    Failed(String),
}

impl AttemptOutcome {
    fn label(&self) -> &'static str {
        match self {
            AttemptOutcome::Succeeded => "success",
            AttemptOutcome::Skipped => "skipped",
            AttemptOutcome::Failed(_) => "failure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierAttempt {
    pub tier: Tier,
    pub outcome: AttemptOutcome,
}

/// Which source the returned title and channel came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSource {
    DataApi,
    OEmbed,
    /// Placeholders; no source answered
    Fallback,
}

/// Outcome of one resolution.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub metadata: VideoMetadata,
    pub attempts: Vec<TierAttempt>,
    /// oEmbed answered 404 for this video.
    pub not_found: bool,
    pub source: MetadataSource,
}

impl Resolution {
    /// Tiers that actually issued a request, in order.
    pub fn attempted_tiers(&self) -> Vec<Tier> {
        self.attempts
            .iter()
            .filter(|a| a.outcome != AttemptOutcome::Skipped)
            .map(|a| a.tier)
            .collect()
    }

    /// Metadata regardless of the 404 verdict.
    pub fn into_metadata(self) -> VideoMetadata {
        self.metadata
    }

    /// Metadata, or `VideoNotFound` when oEmbed confirmed the video is missing.
    pub fn into_confirmed(self) -> ResolveResult<VideoMetadata> {
        if self.not_found {
            return Err(ResolveError::VideoNotFound(self.metadata.id.to_string()));
        }
        Ok(self.metadata)
    }

    /// Describe the degradation when every metadata source failed.
    pub fn degradation(&self) -> Option<ResolveError> {
        if self.source != MetadataSource::Fallback || self.not_found {
            return None;
        }
        let reasons: Vec<String> = self
            .attempts
            .iter()
            .filter_map(|a| match &a.outcome {
                AttemptOutcome::Failed(reason) => Some(format!("{}: {}", a.tier, reason)),
                _ => None,
            })
            .collect();
        Some(ResolveError::UpstreamUnavailable(reasons.join("; ")))
    }
}

/// Source of video metadata for the API layer.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    async fn resolve(&self, video: &VideoReference) -> ResolveResult<Resolution>;

    /// Non-secret configuration summary.
    fn describe(&self) -> ResolverInfo;
}

/// Resolver over the Data API, oEmbed and the watch page.
#[derive(Clone)]
pub struct YoutubeResolver {
    http: Client,
    config: ResolverConfig,
}

impl YoutubeResolver {
    /// Create a new resolver.
    pub fn new(config: ResolverConfig) -> ResolveResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(10)
            .user_agent(concat!("ytr-youtube/", env!("CARGO_PKG_VERSION")))
            .build()?;

        if !config.has_api_key() {
            info!("YOUTUBE_API_KEY not set, Data API tier disabled");
        }

        Ok(Self { http, config })
    }

    /// Create a resolver from environment variables.
    pub fn from_env() -> ResolveResult<Self> {
        Self::new(ResolverConfig::from_env()?)
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Run the tier pipeline. Never fails; tier errors are recorded in the
    /// attempt trail and logged at debug level.
    pub async fn resolve(&self, video: &VideoReference) -> Resolution {
        let mut attempts = Vec::with_capacity(3);

        // Tier 1: keyed Data API
        if self.config.has_api_key() {
            let started = Instant::now();
            let result = data_api::fetch(&self.http, &self.config, video).await;
            match result {
                Ok(metadata) => {
                    attempts.push(record(Tier::DataApi, AttemptOutcome::Succeeded, started));
                    return Resolution {
                        metadata,
                        attempts,
                        not_found: false,
                        source: MetadataSource::DataApi,
                    };
                }
                Err(e) => attempts.push(failed(Tier::DataApi, video, &e, started)),
            }
        } else {
            attempts.push(record(Tier::DataApi, AttemptOutcome::Skipped, Instant::now()));
        }

        // Tier 2: oEmbed
        let started = Instant::now();
        let (mut metadata, not_found, source) =
            match oembed::fetch(&self.http, &self.config, video).await {
                Ok(metadata) => {
                    attempts.push(record(Tier::OEmbed, AttemptOutcome::Succeeded, started));
                    (metadata, false, MetadataSource::OEmbed)
                }
                Err(e) => {
                    let not_found = e.is_not_found();
                    attempts.push(failed(Tier::OEmbed, video, &e, started));
                    let placeholder =
                        VideoMetadata::unavailable(video.clone(), self.config.thumbnail_quality);
                    (placeholder, not_found, MetadataSource::Fallback)
                }
            };

        // Tier 3: duration scrape
        if not_found || !self.config.scrape_duration || metadata.has_duration() {
            attempts.push(record(Tier::PageScrape, AttemptOutcome::Skipped, Instant::now()));
        } else {
            let started = Instant::now();
            match scrape::fetch_duration(&self.http, &self.config, video).await {
                Ok(seconds) => {
                    metadata.duration_seconds = seconds;
                    attempts.push(record(Tier::PageScrape, AttemptOutcome::Succeeded, started));
                }
                Err(e) => attempts.push(failed(Tier::PageScrape, video, &e, started)),
            }
        }

        if source == MetadataSource::Fallback && !not_found {
            warn!(video_id = %video, "All metadata sources failed, returning placeholders");
        }

        Resolution {
            metadata,
            attempts,
            not_found,
            source,
        }
    }
}

#[async_trait]
impl MetadataResolver for YoutubeResolver {
    async fn resolve(&self, video: &VideoReference) -> ResolveResult<Resolution> {
        Ok(YoutubeResolver::resolve(self, video).await)
    }

    fn describe(&self) -> ResolverInfo {
        self.config.info()
    }
}

fn record(tier: Tier, outcome: AttemptOutcome, started: Instant) -> TierAttempt {
    if outcome != AttemptOutcome::Skipped {
        metrics::record_tier_attempt(tier.as_str(), outcome.label(), started.elapsed());
    }
    TierAttempt { tier, outcome }
}

fn failed(tier: Tier, video: &VideoReference, error: &TierError, started: Instant) -> TierAttempt {
    debug!(
        video_id = %video,
        tier = %tier,
        timeout = error.is_timeout(),
        error = %error,
        "Metadata tier failed, falling through"
    );
    record(tier, AttemptOutcome::Failed(error.to_string()), started)
}

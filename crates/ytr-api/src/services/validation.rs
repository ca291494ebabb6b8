//! Transcription eligibility check.
//!
//! One request walks `Received -> ValidatingUrl -> CheckingUsage ->
//! ResolvingMetadata -> CheckingPolicy -> Accepted`, stopping at the first
//! failing stage. Nothing is persisted between requests.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};
use ytr_models::{
    enforce_duration, enforce_monthly_count, validate_youtube_url, ValidationVerdict,
    VideoMetadata,
};
use ytr_youtube::MetadataResolver;

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::metrics;
use crate::services::usage::UsageLookup;

/// Shown when oEmbed confirms the video does not exist.
pub const VIDEO_UNAVAILABLE_MESSAGE: &str =
    "Could not fetch video information. Please check if the video exists and is publicly available.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStage {
    Received,
    ValidatingUrl,
    CheckingUsage,
    ResolvingMetadata,
    CheckingPolicy,
    Accepted,
}

impl ValidationStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStage::Received => "received",
            ValidationStage::ValidatingUrl => "validating_url",
            ValidationStage::CheckingUsage => "checking_usage",
            ValidationStage::ResolvingMetadata => "resolving_metadata",
            ValidationStage::CheckingPolicy => "checking_policy",
            ValidationStage::Accepted => "accepted",
        }
    }
}

impl fmt::Display for ValidationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs the eligibility pipeline for one user and URL.
#[derive(Clone)]
pub struct ValidationService {
    resolver: Arc<dyn MetadataResolver>,
    usage: Arc<dyn UsageLookup>,
}

impl ValidationService {
    pub fn new(resolver: Arc<dyn MetadataResolver>, usage: Arc<dyn UsageLookup>) -> Self {
        Self { resolver, usage }
    }

    /// Produce a verdict for `url`.
    ///
    /// Client-facing rejections come back as `Ok` with a rejected verdict.
    /// Only unexpected failures are returned as `Err`.
    pub async fn validate(&self, user: &AuthUser, url: &str) -> ApiResult<ValidationVerdict> {
        let mut stage = ValidationStage::Received;
        debug!(user_id = %user.user_id, %stage, "Validation started");

        match self.run(user, url, &mut stage).await {
            Ok(metadata) => {
                metrics::record_validation(ValidationStage::Accepted.as_str());
                info!(
                    user_id = %user.user_id,
                    video_id = %metadata.id,
                    duration_seconds = metadata.duration_seconds,
                    "Video accepted for transcription"
                );
                Ok(ValidationVerdict::accepted(metadata))
            }
            Err(err) if err.is_rejection() => {
                metrics::record_validation(stage.as_str());
                info!(user_id = %user.user_id, %stage, reason = %err, "Video rejected");
                Ok(ValidationVerdict::rejected(err.client_message()))
            }
            Err(err) => {
                metrics::record_validation("error");
                warn!(user_id = %user.user_id, %stage, error = %err, "Validation failed");
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        user: &AuthUser,
        url: &str,
        stage: &mut ValidationStage,
    ) -> ApiResult<VideoMetadata> {
        *stage = ValidationStage::ValidatingUrl;
        let video = validate_youtube_url(url)?;

        *stage = ValidationStage::CheckingUsage;
        let usage = self.usage.usage_for(user).await?;
        enforce_monthly_count(&usage.tier, usage.transcripts_used)?;

        *stage = ValidationStage::ResolvingMetadata;
        let resolution = self.resolver.resolve(&video).await?;
        if let Some(degraded) = resolution.degradation() {
            warn!(video_id = %video, reason = %degraded, "Continuing with placeholder metadata");
        }
        let metadata = resolution
            .into_confirmed()
            .map_err(|_| ApiError::bad_request(VIDEO_UNAVAILABLE_MESSAGE))?;

        *stage = ValidationStage::CheckingPolicy;
        enforce_duration(&usage.tier, metadata.duration_seconds)?;

        *stage = ValidationStage::Accepted;
        Ok(metadata)
    }
}

//! Subscription policy checks.
//!
//! Two independent checks gate a transcription request: the video duration
//! against the tier's duration cap, and the caller's monthly count against
//! the tier's monthly cap. Both must pass. Unknown tiers never pass.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::duration::format_duration;
use crate::plan::{tier_limits, Limit};

/// Policy violations. Display strings are shown to users verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
    #[error("Invalid subscription tier.")]
    InvalidTier(String),

    #[error(
        "Video duration ({}) exceeds your plan limit of {}. Please upgrade to process longer videos.",
        formatted(.actual_seconds),
        formatted(.limit_seconds)
    )]
    DurationExceeded { actual_seconds: u64, limit_seconds: u64 },

    #[error("Monthly video limit ({limit}) exceeded. Please upgrade your plan or wait for next month.")]
    MonthlyLimitExceeded { limit: u64 },
}

fn formatted(seconds: &u64) -> String {
    format_duration(*seconds)
}

/// Outcome of a duration check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DurationCheck {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_seconds: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Check a resolved duration against the tier's cap.
///
/// A duration of zero (unknown) always passes a bounded cap.
pub fn check_duration_limit(duration_seconds: u64, tier: &str) -> DurationCheck {
    match enforce_duration(tier, duration_seconds) {
        Ok(limit) => DurationCheck {
            allowed: true,
            limit_seconds: limit.as_option(),
            message: None,
        },
        Err(err) => {
            let limit_seconds = match &err {
                PolicyError::DurationExceeded { limit_seconds, .. } => Some(*limit_seconds),
                _ => None,
            };
            DurationCheck {
                allowed: false,
                limit_seconds,
                message: Some(err.to_string()),
            }
        }
    }
}

/// Returns `true` when another video fits in this month's allowance.
pub fn check_monthly_count(tier: &str, used_this_month: u64) -> bool {
    enforce_monthly_count(tier, used_this_month).is_ok()
}

/// Duration check as a `Result`, yielding the applied cap on success.
pub fn enforce_duration(tier: &str, duration_seconds: u64) -> Result<Limit, PolicyError> {
    let limits = tier_limits(tier).ok_or_else(|| PolicyError::InvalidTier(tier.to_string()))?;

    match limits.max_duration_seconds {
        Limit::Unbounded => Ok(Limit::Unbounded),
        Limit::Bounded(limit) if duration_seconds > limit => Err(PolicyError::DurationExceeded {
            actual_seconds: duration_seconds,
            limit_seconds: limit,
        }),
        bounded => Ok(bounded),
    }
}

/// Monthly count check as a `Result`.
pub fn enforce_monthly_count(tier: &str, used_this_month: u64) -> Result<(), PolicyError> {
    let limits = tier_limits(tier).ok_or_else(|| PolicyError::InvalidTier(tier.to_string()))?;

    match limits.max_videos_per_month {
        Limit::Bounded(limit) if used_this_month >= limit => {
            Err(PolicyError::MonthlyLimitExceeded { limit })
        }
        _ => Ok(()),
    }
}

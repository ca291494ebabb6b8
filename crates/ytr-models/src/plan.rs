//! Subscription tiers and their limits.

use std::collections::HashMap;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Free trial duration cap: 30 minutes.
pub const FREE_TRIAL_MAX_DURATION_SECS: u64 = 30 * 60;
/// Pro duration cap: 2 hours.
pub const PRO_MAX_DURATION_SECS: u64 = 2 * 60 * 60;

pub const FREE_TRIAL_MAX_VIDEOS_PER_MONTH: u64 = 5;
pub const PRO_MAX_VIDEOS_PER_MONTH: u64 = 100;

/// Subscription tier enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    FreeTrial,
    Pro,
    Ultra,
}

impl SubscriptionTier {
    pub const ALL: [SubscriptionTier; 3] = [
        SubscriptionTier::FreeTrial,
        SubscriptionTier::Pro,
        SubscriptionTier::Ultra,
    ];

    /// Exact-name lookup. Unknown names return `None` so callers fail closed.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "free_trial" => Some(SubscriptionTier::FreeTrial),
            "pro" => Some(SubscriptionTier::Pro),
            "ultra" => Some(SubscriptionTier::Ultra),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::FreeTrial => "free_trial",
            SubscriptionTier::Pro => "pro",
            SubscriptionTier::Ultra => "ultra",
        }
    }

    /// Limits for this tier from the static table.
    pub fn limits(&self) -> &'static TierLimits {
        &TIER_LIMITS[self]
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A numeric cap that may be absent.
///
/// Serializes as a number, or `null` when unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Limit {
    Bounded(u64),
    Unbounded,
}

impl Limit {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, Limit::Unbounded)
    }

    pub fn as_option(&self) -> Option<u64> {
        match self {
            Limit::Bounded(n) => Some(*n),
            Limit::Unbounded => None,
        }
    }
}

/// Per-tier limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TierLimits {
    /// Longest accepted video, in seconds.
    pub max_duration_seconds: Limit,
    /// Videos a user may submit per calendar month.
    pub max_videos_per_month: Limit,
}

static TIER_LIMITS: LazyLock<HashMap<SubscriptionTier, TierLimits>> = LazyLock::new(|| {
    HashMap::from([
        (
            SubscriptionTier::FreeTrial,
            TierLimits {
                max_duration_seconds: Limit::Bounded(FREE_TRIAL_MAX_DURATION_SECS),
                max_videos_per_month: Limit::Bounded(FREE_TRIAL_MAX_VIDEOS_PER_MONTH),
            },
        ),
        (
            SubscriptionTier::Pro,
            TierLimits {
                max_duration_seconds: Limit::Bounded(PRO_MAX_DURATION_SECS),
                max_videos_per_month: Limit::Bounded(PRO_MAX_VIDEOS_PER_MONTH),
            },
        ),
        (
            SubscriptionTier::Ultra,
            TierLimits {
                max_duration_seconds: Limit::Unbounded,
                max_videos_per_month: Limit::Unbounded,
            },
        ),
    ])
});

/// Look up limits by tier name. Unknown names return `None`.
pub fn tier_limits(name: &str) -> Option<&'static TierLimits> {
    SubscriptionTier::parse(name).map(|tier| tier.limits())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_table() {
        let free = tier_limits("free_trial").unwrap();
        assert_eq!(free.max_duration_seconds, Limit::Bounded(1800));
        assert_eq!(free.max_videos_per_month, Limit::Bounded(5));

        let pro = tier_limits("pro").unwrap();
        assert_eq!(pro.max_duration_seconds, Limit::Bounded(7200));
        assert_eq!(pro.max_videos_per_month, Limit::Bounded(100));

        let ultra = tier_limits("ultra").unwrap();
        assert!(ultra.max_duration_seconds.is_unbounded());
        assert!(ultra.max_videos_per_month.is_unbounded());
    }

    #[test]
    fn test_unknown_tier_fails_closed() {
        assert!(tier_limits("enterprise").is_none());
        assert!(tier_limits("FREE_TRIAL").is_none());
        assert!(tier_limits("").is_none());
    }

    #[test]
    fn test_tier_round_trip_names() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(SubscriptionTier::parse(tier.as_str()), Some(tier));
        }
    }

    #[test]
    fn test_limits_serialize() {
        let json = serde_json::to_value(SubscriptionTier::Ultra.limits()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"maxDurationSeconds": null, "maxVideosPerMonth": null})
        );
        let json = serde_json::to_value(SubscriptionTier::FreeTrial.limits()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"maxDurationSeconds": 1800, "maxVideosPerMonth": 5})
        );
    }
}

//! Subscription tier and monthly usage lookup.

use async_trait::async_trait;

use crate::auth::AuthUser;
use crate::error::ApiResult;

/// Tier name and usage count for the current billing month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageSnapshot {
    /// Raw tier name; unknown names are rejected by the policy check
    pub tier: String,
    pub transcripts_used: u64,
}

/// Source of per-user tier and usage.
#[async_trait]
pub trait UsageLookup: Send + Sync {
    async fn usage_for(&self, user: &AuthUser) -> ApiResult<UsageSnapshot>;
}

/// Reads tier and usage from the session, falling back to fixed defaults.
#[derive(Debug, Clone)]
pub struct StaticUsageLookup {
    default_tier: String,
    default_usage: u64,
}

impl StaticUsageLookup {
    pub fn new(default_tier: impl Into<String>, default_usage: u64) -> Self {
        Self {
            default_tier: default_tier.into(),
            default_usage,
        }
    }
}

#[async_trait]
impl UsageLookup for StaticUsageLookup {
    async fn usage_for(&self, user: &AuthUser) -> ApiResult<UsageSnapshot> {
        Ok(UsageSnapshot {
            tier: user
                .subscription_tier
                .clone()
                .unwrap_or_else(|| self.default_tier.clone()),
            transcripts_used: user.transcripts_used.unwrap_or(self.default_usage),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(tier: Option<&str>, used: Option<u64>) -> AuthUser {
        AuthUser {
            user_id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            subscription_tier: tier.map(str::to_string),
            transcripts_used: used,
        }
    }

    #[test]
    fn test_defaults_apply() {
        let lookup = StaticUsageLookup::new("free_trial", 0);
        let snapshot = tokio_test::block_on(lookup.usage_for(&user(None, None))).unwrap();
        assert_eq!(
            snapshot,
            UsageSnapshot {
                tier: "free_trial".to_string(),
                transcripts_used: 0
            }
        );
    }

    #[test]
    fn test_session_overrides_defaults() {
        let lookup = StaticUsageLookup::new("free_trial", 0);
        let snapshot = tokio_test::block_on(lookup.usage_for(&user(Some("ultra"), Some(42)))).unwrap();
        assert_eq!(snapshot.tier, "ultra");
        assert_eq!(snapshot.transcripts_used, 42);
    }
}

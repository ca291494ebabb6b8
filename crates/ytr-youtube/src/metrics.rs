//! Resolver metrics.

use std::time::Duration;

use metrics::{counter, histogram};

/// Metric names as constants for consistency.
pub mod names {
    pub const TIER_ATTEMPTS_TOTAL: &str = "ytr_youtube_tier_attempts_total";
    pub const TIER_LATENCY_SECONDS: &str = "ytr_youtube_tier_latency_seconds";
}

/// Record one tier attempt.
pub fn record_tier_attempt(tier: &str, outcome: &str, latency: Duration) {
    let labels = [("tier", tier.to_string()), ("outcome", outcome.to_string())];
    counter!(names::TIER_ATTEMPTS_TOTAL, &labels).increment(1);

    let labels = [("tier", tier.to_string())];
    histogram!(names::TIER_LATENCY_SECONDS, &labels).record(latency.as_secs_f64());
}

//! Health check handlers.

use std::collections::BTreeMap;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use ytr_models::{SubscriptionTier, TierLimits};
use ytr_youtube::ResolverInfo;

use crate::state::AppState;

/// Health response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: String,
}

/// Health check endpoint (liveness probe).
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub environment: String,
    /// Limits per tier; unbounded limits serialize as `null`
    pub tiers: BTreeMap<&'static str, &'static TierLimits>,
    pub resolver: ResolverInfo,
}

/// Readiness check endpoint (readiness probe).
///
/// Upstream reachability is not checked; metadata resolution degrades on its
/// own when YouTube is unreachable.
pub async fn ready(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let tiers = SubscriptionTier::ALL
        .iter()
        .map(|tier| (tier.as_str(), tier.limits()))
        .collect();

    Json(ReadinessResponse {
        status: "ready".to_string(),
        environment: state.config.environment.clone(),
        tiers,
        resolver: state.resolver.describe(),
    })
}

//! Application state.

use std::sync::Arc;

use anyhow::Context;
use ytr_youtube::{MetadataResolver, YoutubeResolver};

use crate::auth::SessionVerifier;
use crate::config::ApiConfig;
use crate::services::{StaticUsageLookup, UsageLookup, ValidationService};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub resolver: Arc<dyn MetadataResolver>,
    pub sessions: Arc<SessionVerifier>,
    pub validation: ValidationService,
}

impl AppState {
    /// Create new application state.
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let secret = config
            .jwt_secret
            .clone()
            .context("AUTH_JWT_SECRET (or NEXTAUTH_SECRET) must be set")?;

        let resolver = YoutubeResolver::from_env().context("Failed to create YouTube resolver")?;
        let usage = StaticUsageLookup::new(config.default_tier.clone(), config.default_monthly_usage);

        Ok(Self::from_parts(
            config,
            Arc::new(resolver),
            Arc::new(SessionVerifier::new(&secret)),
            Arc::new(usage),
        ))
    }

    /// Assemble state from already-built collaborators.
    pub fn from_parts(
        config: ApiConfig,
        resolver: Arc<dyn MetadataResolver>,
        sessions: Arc<SessionVerifier>,
        usage: Arc<dyn UsageLookup>,
    ) -> Self {
        let validation = ValidationService::new(Arc::clone(&resolver), usage);

        Self {
            config,
            resolver,
            sessions,
            validation,
        }
    }
}

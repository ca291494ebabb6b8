//! Session token authentication.
//!
//! Sessions are issued elsewhere as HS256 JWTs signed with a shared secret.
//! This module only verifies them.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Decoded session claims.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User ID
    pub sub: String,
    pub email: Option<String>,
    /// Expiration
    pub exp: i64,
    #[serde(rename = "subscriptionTier", default)]
    pub subscription_tier: Option<String>,
    #[serde(rename = "transcriptsUsed", default)]
    pub transcripts_used: Option<u64>,
}

/// Authenticated user extracted from request.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    /// Tier carried by the session, if any
    pub subscription_tier: Option<String>,
    /// Videos used this month, if the session carries it
    pub transcripts_used: Option<u64>,
}

/// A session without an email is not an authenticated user.
impl TryFrom<SessionClaims> for AuthUser {
    type Error = ApiError;

    fn try_from(claims: SessionClaims) -> Result<Self, Self::Error> {
        let email = claims
            .email
            .filter(|email| !email.trim().is_empty())
            .ok_or_else(|| {
                debug!(user_id = %claims.sub, "Session token has no email");
                ApiError::unauthorized()
            })?;

        Ok(Self {
            user_id: claims.sub,
            email,
            subscription_tier: claims.subscription_tier,
            transcripts_used: claims.transcripts_used,
        })
    }
}

/// Verifies session tokens against the shared secret.
pub struct SessionVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a session token.
    pub fn verify_token(&self, token: &str) -> Result<SessionClaims, ApiError> {
        decode::<SessionClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "Session token rejected");
                ApiError::unauthorized()
            })
    }
}

/// Axum extractor for authenticated user.
#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(ApiError::unauthorized)?;

        let claims = state.sessions.verify_token(token)?;

        AuthUser::try_from(claims)
    }
}

//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use ytr_models::{PolicyError, UrlValidationError};
use ytr_youtube::ResolveError;

pub type ApiResult<T> = Result<T, ApiError>;

/// Body for every masked 5xx.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
/// Body for a missing or rejected session.
pub const AUTH_REQUIRED_MESSAGE: &str = "Authentication required";
/// Metadata lookup for a video oEmbed reported missing.
pub const VIDEO_NOT_FOUND_MESSAGE: &str = "Video not found or unavailable";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Tier or usage rule rejected the request.
    #[error("Policy rejected: {0}")]
    PolicyRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Resolver error: {0}")]
    Resolver(ResolveError),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        Self::Unauthorized(AUTH_REQUIRED_MESSAGE.to_string())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) | ApiError::PolicyRejected(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) | ApiError::Resolver(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the client. Server errors never leak detail.
    pub fn client_message(&self) -> String {
        match self {
            ApiError::Unauthorized(msg)
            | ApiError::BadRequest(msg)
            | ApiError::PolicyRejected(msg)
            | ApiError::NotFound(msg) => msg.clone(),
            ApiError::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
            ApiError::Internal(_) | ApiError::Resolver(_) => INTERNAL_ERROR_MESSAGE.to_string(),
        }
    }

    /// 4xx errors that a validation verdict can carry.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            ApiError::BadRequest(_) | ApiError::PolicyRejected(_) | ApiError::NotFound(_)
        )
    }
}

impl From<UrlValidationError> for ApiError {
    fn from(e: UrlValidationError) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}

impl From<PolicyError> for ApiError {
    fn from(e: PolicyError) -> Self {
        ApiError::PolicyRejected(e.to_string())
    }
}

impl From<ResolveError> for ApiError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::VideoNotFound(_) => ApiError::not_found(VIDEO_NOT_FOUND_MESSAGE),
            other => ApiError::Resolver(other),
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = %self, "Request failed");
        }

        let body = ErrorResponse {
            error: self.client_message(),
        };

        (status, Json(body)).into_response()
    }
}

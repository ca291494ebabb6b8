//! Resolver error types.

use thiserror::Error;

/// Result type for resolver construction and confirmation.
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors visible outside the resolver.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The oEmbed source answered 404 for this video.
    #[error("Video not found or unavailable: {0}")]
    VideoNotFound(String),

    /// No source answered; metadata was degraded to placeholders.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Invalid resolver configuration: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ResolveError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolveError::VideoNotFound(_))
    }
}

/// Failure of a single tier. Always swallowed by the pipeline and recorded
/// in the attempt trail.
#[derive(Debug, Error)]
pub enum TierError {
    #[error("tier not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("upstream returned HTTP {0}")]
    Status(u16),

    #[error("response contained no items")]
    Empty,

    #[error("duration token not found in page")]
    NoMatch,
}

impl TierError {
    /// Map a non-success HTTP status.
    pub fn from_status(status: reqwest::StatusCode) -> Self {
        Self::Status(status.as_u16())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TierError::Status(404))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, TierError::Network(e) if e.is_timeout())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_error_not_found() {
        assert!(TierError::Status(404).is_not_found());
        assert!(!TierError::Status(500).is_not_found());
        assert!(!TierError::Empty.is_not_found());
        assert!(TierError::from_status(reqwest::StatusCode::NOT_FOUND).is_not_found());
    }

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(
            ResolveError::VideoNotFound("dQw4w9WgXcQ".into()).to_string(),
            "Video not found or unavailable: dQw4w9WgXcQ"
        );
        assert!(ResolveError::VideoNotFound("x".into()).is_not_found());
        assert!(!ResolveError::internal("boom").is_not_found());
    }
}

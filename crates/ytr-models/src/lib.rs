//! Shared data models for the YouTranscript backend.
//!
//! This crate provides pure, I/O-free building blocks:
//! - YouTube URL validation and the [`VideoReference`] handle
//! - Duration parsing and formatting
//! - Thumbnail URL synthesis
//! - Subscription tiers, their limits, and the policy checks over them
//! - The [`VideoMetadata`] and [`ValidationVerdict`] wire types

pub mod duration;
pub mod filename;
pub mod plan;
pub mod policy;
pub mod thumbnail;
pub mod verdict;
pub mod video;
pub mod youtube_url;

// Re-export common types
pub use duration::{format_duration, parse_iso8601_duration};
pub use filename::safe_filename;
pub use plan::{tier_limits, Limit, SubscriptionTier, TierLimits};
pub use policy::{
    check_duration_limit, check_monthly_count, enforce_duration, enforce_monthly_count,
    DurationCheck, PolicyError,
};
pub use thumbnail::{thumbnail_url, ThumbnailQuality};
pub use verdict::ValidationVerdict;
pub use video::VideoMetadata;
pub use youtube_url::{
    extract_video_id, validate_youtube_url, UrlValidationError, UrlValidationResult,
    VideoReference,
};

//! YouTube metadata resolver.
//!
//! Resolves a [`VideoReference`](ytr_models::VideoReference) to
//! [`VideoMetadata`](ytr_models::VideoMetadata) through three sources in
//! order:
//! 1. The YouTube Data API v3, when an API key is configured
//! 2. oEmbed (title, channel and thumbnail only)
//! 3. A scrape of the watch page for the duration when it is still unknown
//!
//! Tier failures never escape [`YoutubeResolver::resolve`]. They are logged
//! at debug level and recorded in [`Resolution::attempts`].

pub mod config;
pub mod error;
pub mod metrics;
pub mod resolver;

mod data_api;
mod oembed;
mod scrape;

pub use config::{ResolverConfig, ResolverInfo};
pub use error::{ResolveError, ResolveResult, TierError};
pub use resolver::{
    AttemptOutcome, MetadataResolver, MetadataSource, Resolution, Tier, TierAttempt,
    YoutubeResolver,
};

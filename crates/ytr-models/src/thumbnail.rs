//! Thumbnail URL synthesis.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Thumbnail host used when an upstream does not supply one.
pub const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";

/// Thumbnail quality variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailQuality {
    Default,
    #[default]
    Hq,
    Mq,
    Sd,
    #[serde(rename = "maxres")]
    MaxRes,
}

impl ThumbnailQuality {
    /// File stem used on the thumbnail host.
    pub fn file_stem(&self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default",
            ThumbnailQuality::Hq => "hqdefault",
            ThumbnailQuality::Mq => "mqdefault",
            ThumbnailQuality::Sd => "sddefault",
            ThumbnailQuality::MaxRes => "maxresdefault",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThumbnailQuality::Default => "default",
            ThumbnailQuality::Hq => "hq",
            ThumbnailQuality::Mq => "mq",
            ThumbnailQuality::Sd => "sd",
            ThumbnailQuality::MaxRes => "maxres",
        }
    }
}

impl fmt::Display for ThumbnailQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThumbnailQuality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(ThumbnailQuality::Default),
            "hq" => Ok(ThumbnailQuality::Hq),
            "mq" => Ok(ThumbnailQuality::Mq),
            "sd" => Ok(ThumbnailQuality::Sd),
            "maxres" => Ok(ThumbnailQuality::MaxRes),
            other => Err(format!("unknown thumbnail quality: {}", other)),
        }
    }
}

/// Build `https://img.youtube.com/vi/{id}/{stem}.jpg`.
pub fn thumbnail_url(video_id: &str, quality: ThumbnailQuality) -> String {
    format!("{}/{}/{}.jpg", THUMBNAIL_HOST, video_id, quality.file_stem())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thumbnail_variants() {
        let id = "dQw4w9WgXcQ";
        assert_eq!(
            thumbnail_url(id, ThumbnailQuality::default()),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        );
        assert_eq!(
            thumbnail_url(id, ThumbnailQuality::Default),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/default.jpg"
        );
        assert_eq!(
            thumbnail_url(id, ThumbnailQuality::MaxRes),
            "https://img.youtube.com/vi/dQw4w9WgXcQ/maxresdefault.jpg"
        );
    }

    #[test]
    fn test_quality_from_str() {
        assert_eq!("maxres".parse::<ThumbnailQuality>(), Ok(ThumbnailQuality::MaxRes));
        assert_eq!(" SD ".parse::<ThumbnailQuality>(), Ok(ThumbnailQuality::Sd));
        assert!("ultra".parse::<ThumbnailQuality>().is_err());
    }
}

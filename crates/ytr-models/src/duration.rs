//! Video duration parsing and formatting.
//!
//! Durations are whole seconds. Zero means "unknown", not a zero-length video.

use std::sync::LazyLock;

use regex::Regex;

static ISO_DURATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").unwrap());

/// Parse a `PT[nH][nM][nS]` duration token into total seconds.
///
/// Missing components count as zero. Anything without a `PT` token parses
/// to zero. A component too large for `u64` saturates to `u64::MAX`.
///
/// # Examples
/// ```
/// use ytr_models::duration::parse_iso8601_duration;
/// assert_eq!(parse_iso8601_duration("PT4M13S"), 253);
/// assert_eq!(parse_iso8601_duration("garbage"), 0);
/// ```
pub fn parse_iso8601_duration(token: &str) -> u64 {
    let Some(caps) = ISO_DURATION.captures(token) else {
        return 0;
    };

    // Captures are all digits, so a failed parse can only be overflow
    let component = |idx: usize| -> u64 {
        caps.get(idx)
            .map(|m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
            .unwrap_or(0)
    };

    component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3))
}

/// Format seconds as `H:MM:SS`, or `M:SS` when under an hour.
///
/// # Examples
/// ```
/// use ytr_models::duration::format_duration;
/// assert_eq!(format_duration(3723), "1:02:03");
/// assert_eq!(format_duration(65), "1:05");
/// ```
pub fn format_duration(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

//! Last-resort duration scrape of the public watch page.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use ytr_models::VideoReference;

use crate::config::ResolverConfig;
use crate::error::TierError;

static LENGTH_SECONDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""lengthSeconds":"(\d+)""#).expect("valid regex"));

/// Fetch the watch page and pull the first `"lengthSeconds"` token.
pub(crate) async fn fetch_duration(
    http: &Client,
    config: &ResolverConfig,
    video: &VideoReference,
) -> Result<u64, TierError> {
    let response = http
        .get(&config.watch_base)
        .query(&[("v", video.as_str())])
        .header(USER_AGENT, &config.scrape_user_agent)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(TierError::from_status(response.status()));
    }

    let page = response.text().await?;
    extract_length_seconds(&page).ok_or(TierError::NoMatch)
}

pub(crate) fn extract_length_seconds(page: &str) -> Option<u64> {
    LENGTH_SECONDS
        .captures(page)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

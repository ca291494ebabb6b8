//! YouTube metadata lookup.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ytr_models::{VideoMetadata, VideoReference};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MetadataQuery {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetadataResponse {
    #[serde(rename = "videoInfo")]
    pub video_info: VideoMetadata,
}

/// GET /api/youtube/metadata?videoId=ID
pub async fn get_metadata(
    State(state): State<AppState>,
    Query(query): Query<MetadataQuery>,
) -> ApiResult<Json<MetadataResponse>> {
    let raw = query
        .video_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("Video ID is required"))?;

    let video =
        VideoReference::parse(&raw).ok_or_else(|| ApiError::bad_request("Invalid video ID format"))?;

    let resolution = state.resolver.resolve(&video).await?;
    debug!(
        video_id = %video,
        tiers = ?resolution.attempted_tiers(),
        "Metadata resolved"
    );

    Ok(Json(MetadataResponse {
        video_info: resolution.into_confirmed()?,
    }))
}

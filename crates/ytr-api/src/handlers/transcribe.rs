//! Transcription pre-flight validation.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use ytr_models::{ValidationVerdict, VideoMetadata};

use crate::auth::AuthUser;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub const URL_REQUIRED_MESSAGE: &str = "YouTube URL is required";
pub const ACCEPTED_MESSAGE: &str = "Video is valid for transcription";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateResponse {
    pub success: bool,
    pub video_info: VideoMetadata,
    pub message: String,
}

/// POST /api/transcribe/validate
///
/// Body: `{"url": "<youtube url>"}`. A missing or non-string `url` is a 400.
pub async fn validate_video(
    State(state): State<AppState>,
    user: AuthUser,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<ValidateResponse>> {
    let url = payload
        .ok()
        .and_then(|Json(body)| match body.get("url") {
            Some(Value::String(url)) if !url.is_empty() => Some(url.clone()),
            _ => None,
        })
        .ok_or_else(|| ApiError::bad_request(URL_REQUIRED_MESSAGE))?;

    let verdict = state.validation.validate(&user, &url).await?;

    verdict_response(verdict).map(Json)
}

/// Map a verdict onto the response body or a 400 carrying its message.
fn verdict_response(verdict: ValidationVerdict) -> ApiResult<ValidateResponse> {
    match verdict {
        ValidationVerdict {
            ok: true,
            metadata: Some(video_info),
            ..
        } => Ok(ValidateResponse {
            success: true,
            video_info,
            message: ACCEPTED_MESSAGE.to_string(),
        }),
        ValidationVerdict {
            ok: false,
            error_message: Some(message),
            ..
        } => Err(ApiError::bad_request(message)),
        ValidationVerdict { ok, .. } => Err(ApiError::internal(format!(
            "inconsistent validation verdict (ok = {})",
            ok
        ))),
    }
}

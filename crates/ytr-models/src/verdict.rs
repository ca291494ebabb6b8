//! Validation verdict: the single observable output of a validation request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::video::VideoMetadata;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VideoMetadata>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl ValidationVerdict {
    pub fn accepted(metadata: VideoMetadata) -> Self {
        Self {
            ok: true,
            metadata: Some(metadata),
            error_message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            metadata: None,
            error_message: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_has_only_message() {
        let verdict = ValidationVerdict::rejected("Invalid subscription tier.");
        assert!(!verdict.ok);
        assert!(verdict.metadata.is_none());
        assert_eq!(
            serde_json::to_value(&verdict).unwrap(),
            serde_json::json!({"ok": false, "errorMessage": "Invalid subscription tier."})
        );
    }
}

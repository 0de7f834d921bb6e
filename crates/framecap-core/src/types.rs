//! Result types shared by every entry point.
//!
//! [`InferenceResult`] is the only thing adapters ever see from the pipeline:
//! a caption, or a classified failure with a human-readable message.

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

/// Failure classification preserved end-to-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorClass {
    /// The inference endpoint failed (auth, throttling, connectivity).
    AwsError,
    /// A template or image file could not be found or read.
    FileError,
    /// Anything else, including malformed response envelopes.
    UnexpectedError,
}

impl ErrorClass {
    /// Prefix used in failure messages.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorClass::AwsError => "AWS error",
            ErrorClass::FileError => "File error",
            ErrorClass::UnexpectedError => "Unexpected error",
        }
    }
}

impl std::fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of one captioning call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InferenceResult {
    Success {
        text: String,
    },
    Failure {
        error_message: String,
        error_class: ErrorClass,
    },
}

impl InferenceResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self::Success { text: text.into() }
    }

    /// Fold a pipeline error into a failure, prefixing the message with its class.
    pub fn from_error(error: &PipelineError) -> Self {
        let error_class = error.class();
        Self::Failure {
            error_message: format!("{}: {}", error_class.label(), error),
            error_class,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn error_class(&self) -> Option<ErrorClass> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error_class, .. } => Some(*error_class),
        }
    }

    /// Wire shape returned by the HTTP handler and `caption --json`.
    pub fn to_response(&self) -> CaptionResponse {
        match self {
            Self::Success { text } => CaptionResponse {
                success: true,
                output_text: Some(text.clone()),
                error: None,
            },
            Self::Failure { error_message, .. } => CaptionResponse {
                success: false,
                output_text: None,
                error: Some(error_message.clone()),
            },
        }
    }
}

impl From<PipelineError> for InferenceResult {
    fn from(error: PipelineError) -> Self {
        Self::from_error(&error)
    }
}

/// `{success, output_text}` / `{success, error}` body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CaptionResponse {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            output_text: None,
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_message_is_prefixed_with_class() {
        let err = PipelineError::Transport {
            message: "ThrottlingException: Too many requests".to_string(),
            status_code: Some(429),
        };
        let result = InferenceResult::from_error(&err);
        assert_eq!(result.error_class(), Some(ErrorClass::AwsError));
        match result {
            InferenceResult::Failure { error_message, .. } => {
                assert_eq!(error_message, "AWS error: ThrottlingException: Too many requests");
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_success_response_shape() {
        let json = serde_json::to_value(InferenceResult::success("a caption").to_response()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "output_text": "a caption"})
        );
    }

    #[test]
    fn test_failure_response_shape() {
        let result = InferenceResult::from_error(&PipelineError::MissingText);
        let json = serde_json::to_value(result.to_response()).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .starts_with("Unexpected error: "));
        assert!(json.get("output_text").is_none());
    }
}

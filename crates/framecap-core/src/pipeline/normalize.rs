//! Response normalisation into [`InferenceResult`].

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::llm::RawEnvelope;
use crate::types::InferenceResult;

#[derive(Deserialize)]
struct ResponseDocument {
    content: Vec<ResponseContent>,
}

#[derive(Deserialize)]
struct ResponseContent {
    text: Option<String>,
}

/// Pull `content[0].text` out of a response body.
pub fn extract_caption(body: &str) -> PipelineResult<String> {
    let document: ResponseDocument =
        serde_json::from_str(body).map_err(|e| PipelineError::Parse(e.to_string()))?;
    document
        .content
        .into_iter()
        .next()
        .and_then(|item| item.text)
        .ok_or(PipelineError::MissingText)
}

/// Turn the outcome of an invocation into the uniform result shape.
pub async fn normalize(outcome: PipelineResult<RawEnvelope>) -> InferenceResult {
    let caption = match outcome {
        Ok(envelope) => envelope
            .drain()
            .await
            .and_then(|body| extract_caption(&body)),
        Err(e) => Err(e),
    };

    match caption {
        Ok(text) => InferenceResult::success(text),
        Err(e) => {
            tracing::warn!("Caption generation failed: {e}");
            InferenceResult::from_error(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::MaterializedBody;
    use crate::types::ErrorClass;
    use std::path::{Path, PathBuf};

    fn envelope(body: &str) -> PipelineResult<RawEnvelope> {
        Ok(RawEnvelope::new(MaterializedBody::from_text(body)))
    }

    #[tokio::test]
    async fn test_first_content_text_is_the_caption() {
        let result = normalize(envelope(r#"{"content":[{"text":"a caption"}]}"#)).await;
        assert_eq!(result, InferenceResult::success("a caption"));
    }

    #[tokio::test]
    async fn test_only_first_item_is_used() {
        let body = r#"{"id":"msg_1","content":[{"type":"text","text":"first"},{"type":"text","text":"second"}],"stop_reason":"end_turn"}"#;
        let result = normalize(envelope(body)).await;
        assert_eq!(result, InferenceResult::success("first"));
    }

    #[tokio::test]
    async fn test_unparsable_body_is_unexpected() {
        let result = normalize(envelope("<html>oops</html>")).await;
        assert_eq!(result.error_class(), Some(ErrorClass::UnexpectedError));
    }

    #[tokio::test]
    async fn test_missing_text_is_unexpected() {
        for body in [
            r#"{"content":[]}"#,
            r#"{"content":[{"type":"tool_use"}]}"#,
            r#"{"message":"no content"}"#,
            r#"{"content":[{"text":42}]}"#,
        ] {
            let result = normalize(envelope(body)).await;
            assert_eq!(
                result.error_class(),
                Some(ErrorClass::UnexpectedError),
                "body: {body}"
            );
        }
    }

    #[tokio::test]
    async fn test_transport_error_is_aws_error() {
        let result = normalize(Err(PipelineError::Transport {
            message: "ThrottlingException".to_string(),
            status_code: Some(429),
        }))
        .await;
        assert_eq!(result.error_class(), Some(ErrorClass::AwsError));
    }

    #[tokio::test]
    async fn test_not_found_is_file_error() {
        let result = normalize(Err(PipelineError::not_found(
            Path::new("x.jpg"),
            vec![PathBuf::from("x.jpg")],
        )))
        .await;
        assert_eq!(result.error_class(), Some(ErrorClass::FileError));
    }
}

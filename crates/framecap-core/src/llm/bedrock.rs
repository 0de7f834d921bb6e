//! AWS Bedrock runtime backend using the official SDK.
//!
//! Credentials come from the default AWS provider chain (environment,
//! profile, instance/task role).

use async_trait::async_trait;
use aws_sdk_bedrockruntime::config::Region;
use aws_sdk_bedrockruntime::error::{DisplayErrorContext, SdkError};
use aws_sdk_bedrockruntime::operation::invoke_model::InvokeModelError;
use aws_sdk_bedrockruntime::primitives::Blob;
use aws_sdk_bedrockruntime::Client;

use super::backend::{InferenceBackend, MaterializedBody, RawEnvelope};
use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::request::InferenceRequest;

/// Bedrock `InvokeModel` backend.
#[derive(Clone)]
pub struct BedrockBackend {
    client: Client,
    region: String,
}

impl BedrockBackend {
    /// Build a client for `region` from the ambient AWS configuration.
    pub async fn from_env(region: &str) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;
        Self {
            client: Client::new(&sdk_config),
            region: region.to_string(),
        }
    }
}

#[async_trait]
impl InferenceBackend for BedrockBackend {
    fn name(&self) -> &str {
        "bedrock"
    }

    async fn invoke(&self, request: &InferenceRequest) -> PipelineResult<RawEnvelope> {
        let body = request
            .to_body()
            .map_err(|e| PipelineError::Unexpected(format!("Failed to encode request: {e}")))?;

        tracing::info!(
            "Invoking {} in {} ({} byte body)",
            request.model_id,
            self.region,
            body.len()
        );

        // Credentials and signing come from the SDK client
        let output = self
            .client
            .invoke_model()
            .model_id(&request.model_id)
            .content_type("application/json")
            .accept("application/json")
            .body(Blob::new(body))
            .send()
            .await
            .map_err(|e| transport_error(&e))?;

        Ok(RawEnvelope::new(MaterializedBody(output.body.into_inner())))
    }
}

/// Fold an SDK failure into a transport error, keeping the HTTP status when
/// the service answered.
fn transport_error(err: &SdkError<InvokeModelError>) -> PipelineError {
    let message = DisplayErrorContext(err).to_string();
    tracing::error!("Bedrock invoke_model failed: {message}");
    PipelineError::Transport {
        message,
        status_code: err.raw_response().map(|r| r.status().as_u16()),
    }
}

//! Bedrock runtime REST backend over plain HTTPS.
//!
//! Posts the request body to `{endpoint}/model/{model_id}/invoke`, optionally
//! authenticated with a Bedrock API key as a bearer token. The response body
//! is handed back unread and streamed when the envelope is drained.

use async_trait::async_trait;
use futures_util::StreamExt;

use super::backend::{decode_utf8, InferenceBackend, RawEnvelope, ResponseBody};
use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::request::InferenceRequest;

/// HTTP backend for the Bedrock runtime API (or anything speaking its shape).
pub struct HttpBackend {
    endpoint: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(endpoint: &str, api_key: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.map(String::from),
            client: reqwest::Client::new(),
        }
    }

    fn invoke_url(&self, model_id: &str) -> String {
        format!("{}/model/{}/invoke", self.endpoint, model_id)
    }
}

/// Streamed HTTP response body.
pub struct StreamingBody(reqwest::Response);

#[async_trait]
impl ResponseBody for StreamingBody {
    async fn drain(self: Box<Self>) -> PipelineResult<String> {
        let mut stream = self.0.bytes_stream();
        let mut buf = Vec::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| PipelineError::Transport {
                message: format!("Failed to read response body: {e}"),
                status_code: None,
            })?;
            buf.extend_from_slice(&chunk);
        }
        decode_utf8(buf)
    }
}

#[async_trait]
impl InferenceBackend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn invoke(&self, request: &InferenceRequest) -> PipelineResult<RawEnvelope> {
        let body = request
            .to_body()
            .map_err(|e| PipelineError::Unexpected(format!("Failed to encode request: {e}")))?;
        let url = self.invoke_url(&request.model_id);
        tracing::info!("POST {} ({} byte body)", url, body.len());

        let mut builder = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .header("accept", "application/json")
            .body(body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let resp = builder.send().await.map_err(|e| PipelineError::Transport {
            message: format!("Bedrock request failed: {e}"),
            status_code: None,
        })?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp
                .text()
                .await
                .unwrap_or_else(|e| format!("<body unreadable: {e}>"));
            tracing::error!("Bedrock HTTP {status}: {text}");
            return Err(PipelineError::Transport {
                message: format!("Bedrock HTTP {status}: {text}"),
                status_code: Some(status.as_u16()),
            });
        }

        Ok(RawEnvelope::new(StreamingBody(resp)))
    }
}

//! Inference backend trait, response envelope, and backend factory.
//!
//! A backend sends one [`InferenceRequest`] and hands back a [`RawEnvelope`].
//! Whatever shape the transport returns its body in (a materialised blob from
//! the AWS SDK, a streamed HTTP body from reqwest), the envelope exposes it
//! through [`ResponseBody::drain`] so normalisation has one input shape.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{BackendKind, Config};
use crate::error::{PipelineError, PipelineResult};
use crate::pipeline::request::InferenceRequest;

/// A response body that can be drained to UTF-8 text exactly once.
#[async_trait]
pub trait ResponseBody: Send {
    async fn drain(self: Box<Self>) -> PipelineResult<String>;
}

/// A body that is already fully in memory.
#[derive(Debug, Clone)]
pub struct MaterializedBody(pub Vec<u8>);

impl MaterializedBody {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into().into_bytes())
    }
}

#[async_trait]
impl ResponseBody for MaterializedBody {
    async fn drain(self: Box<Self>) -> PipelineResult<String> {
        decode_utf8(self.0)
    }
}

pub(crate) fn decode_utf8(bytes: Vec<u8>) -> PipelineResult<String> {
    String::from_utf8(bytes)
        .map_err(|e| PipelineError::Parse(format!("response body is not valid UTF-8: {e}")))
}

/// Raw response wrapper returned by a backend before text extraction.
pub struct RawEnvelope {
    body: Box<dyn ResponseBody>,
}

impl RawEnvelope {
    pub fn new(body: impl ResponseBody + 'static) -> Self {
        Self {
            body: Box::new(body),
        }
    }

    /// Read the whole body as UTF-8 text.
    pub async fn drain(self) -> PipelineResult<String> {
        self.body.drain().await
    }
}

impl std::fmt::Debug for RawEnvelope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawEnvelope").finish_non_exhaustive()
    }
}

/// Trait that all inference transports implement.
///
/// Implementations hold no per-call state and are shared across concurrent
/// invocations behind an `Arc`.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Backend name for logging (e.g., "bedrock", "http").
    fn name(&self) -> &str;

    /// Send one request. Any failure to obtain a response is a
    /// [`PipelineError::Transport`].
    async fn invoke(&self, request: &InferenceRequest) -> PipelineResult<RawEnvelope>;
}

/// Resolve `${ENV_VAR}` references in config strings.
pub fn resolve_env_var(value: &str) -> Option<String> {
    if value.starts_with("${") && value.ends_with('}') {
        let var_name = &value[2..value.len() - 1];
        std::env::var(var_name).ok().filter(|v| !v.is_empty())
    } else if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Factory that creates the configured backend.
pub struct BackendFactory;

impl BackendFactory {
    pub async fn create(config: &Config) -> Arc<dyn InferenceBackend> {
        match config.backend.kind {
            BackendKind::Bedrock => {
                Arc::new(super::bedrock::BedrockBackend::from_env(&config.model.region).await)
            }
            BackendKind::Http => {
                let api_key = resolve_env_var(&config.backend.api_key);
                if api_key.is_none() {
                    tracing::warn!(
                        "No bearer token configured for the http backend; requests are sent unauthenticated"
                    );
                }
                Arc::new(super::http::HttpBackend::new(
                    &config.http_endpoint(),
                    api_key.as_deref(),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_materialized_body_drains_utf8() {
        let envelope = RawEnvelope::new(MaterializedBody::from_text("{\"content\":[]}"));
        assert_eq!(envelope.drain().await.unwrap(), "{\"content\":[]}");
    }

    #[tokio::test]
    async fn test_materialized_body_rejects_invalid_utf8() {
        let envelope = RawEnvelope::new(MaterializedBody(vec![0xFF, 0xFE, 0xFD]));
        assert!(matches!(
            envelope.drain().await,
            Err(PipelineError::Parse(_))
        ));
    }

    #[test]
    fn test_resolve_env_var() {
        assert_eq!(resolve_env_var("plain-token"), Some("plain-token".to_string()));
        assert_eq!(resolve_env_var(""), None);
        assert_eq!(resolve_env_var("${FRAMECAP_DEFINITELY_UNSET_123}"), None);
    }

    #[tokio::test]
    async fn test_factory_builds_http_backend() {
        let mut config = Config::default();
        config.backend.kind = BackendKind::Http;
        config.backend.endpoint = Some("http://127.0.0.1:1".to_string());
        config.backend.api_key = "token".to_string();

        let backend = BackendFactory::create(&config).await;
        assert_eq!(backend.name(), "http");
    }
}

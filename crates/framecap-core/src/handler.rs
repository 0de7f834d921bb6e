//! Cloud entry point: an API-Gateway-shaped event in, an HTTP response out.
//!
//! The handler never surfaces a raw error. `OPTIONS` short-circuits with CORS
//! headers, a `POST` without image or description is a 400, adapter failures
//! are a 500, and every pipeline outcome is a 200 carrying the tagged result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pipeline::{CaptionGenerator, CaptionJob, ImageSource};
use crate::types::CaptionResponse;

pub const MISSING_INPUT_ERROR: &str = "Missing image or description";

/// Incoming HTTP event.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpEvent {
    #[serde(default)]
    pub http_method: Option<String>,

    #[serde(default)]
    pub body: Option<String>,
}

impl HttpEvent {
    pub fn new(method: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            http_method: Some(method.into()),
            body: Some(body.into()),
        }
    }
}

/// Outgoing HTTP response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    fn preflight() -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert(
            "Access-Control-Allow-Headers".to_string(),
            "Content-Type".to_string(),
        );
        headers.insert(
            "Access-Control-Allow-Methods".to_string(),
            "POST, OPTIONS".to_string(),
        );
        Self {
            status_code: 200,
            headers,
            body: String::new(),
        }
    }

    /// JSON response with the CORS origin header.
    pub fn json(status_code: u16, body: &CaptionResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Access-Control-Allow-Origin".to_string(), "*".to_string());
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        let body = serde_json::to_string(body).unwrap_or_else(|_| {
            r#"{"success":false,"error":"Failed to encode response"}"#.to_string()
        });
        Self {
            status_code,
            headers,
            body,
        }
    }
}

#[derive(Deserialize)]
struct CaptionPayload {
    #[serde(default)]
    image: Option<String>,

    #[serde(default)]
    description: Option<String>,
}

/// Handle one event.
pub async fn handle_event(generator: &CaptionGenerator, event: HttpEvent) -> HttpResponse {
    if event
        .http_method
        .as_deref()
        .is_some_and(|m| m.eq_ignore_ascii_case("OPTIONS"))
    {
        return HttpResponse::preflight();
    }

    match handle_post(generator, event.body.as_deref()).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!("Handler error: {e}");
            HttpResponse::json(500, &CaptionResponse::error(e.to_string()))
        }
    }
}

async fn handle_post(
    generator: &CaptionGenerator,
    body: Option<&str>,
) -> Result<HttpResponse, serde_json::Error> {
    let payload: CaptionPayload = serde_json::from_str(body.unwrap_or("{}"))?;

    let (image, description) = match (payload.image, payload.description) {
        (Some(image), Some(description)) if !image.is_empty() && !description.is_empty() => {
            (image, description)
        }
        _ => {
            return Ok(HttpResponse::json(
                400,
                &CaptionResponse::error(MISSING_INPUT_ERROR),
            ))
        }
    };

    tracing::info!(
        "Caption request: {} chars of image data, description {:?}",
        image.len(),
        description
    );
    let job = CaptionJob::new(ImageSource::FromInlinePayload(image), description);
    let result = generator.generate(&job).await;
    Ok(HttpResponse::json(200, &result.to_response()))
}

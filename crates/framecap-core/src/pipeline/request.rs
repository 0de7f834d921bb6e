//! Inference request construction.
//!
//! The request body follows the Bedrock flavour of the Anthropic Messages
//! API: one user message whose content is `[image, text]`, in that order.

use serde::Serialize;

use super::image::ImageAsset;
use super::prompt::PLACEHOLDER;
use crate::config::ModelConfig;

/// Token budget and sampling temperature for one call.
///
/// Values pass through to the endpoint unchecked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 1.0,
        }
    }
}

impl From<&ModelConfig> for GenerationParams {
    fn from(config: &ModelConfig) -> Self {
        Self {
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }
}

/// A fully assembled request for the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    /// Addresses the endpoint; not part of the body.
    #[serde(skip)]
    pub model_id: String,
    pub anthropic_version: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<Message>,
}

impl InferenceRequest {
    /// Serialized JSON body.
    pub fn to_body(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }

    /// Text of the prompt block in the user message, if present.
    pub fn prompt_text(&self) -> Option<&str> {
        self.messages
            .first()?
            .content
            .iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Image { .. } => None,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Message {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "image")]
    Image { source: ImageBlockSource },
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBlockSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub media_type: String,
    pub data: String,
}

/// Replace every placeholder occurrence with `description`.
///
/// Single pass: placeholder-like text inside `description` is left alone.
pub fn fill_template(template: &str, description: &str) -> String {
    template.replace(PLACEHOLDER, description)
}

/// Builds requests for a fixed model.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    model_id: String,
    anthropic_version: String,
}

impl RequestBuilder {
    pub fn new(model_id: impl Into<String>, anthropic_version: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            anthropic_version: anthropic_version.into(),
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        Self::new(&config.model_id, &config.anthropic_version)
    }

    pub fn build(
        &self,
        template: &str,
        description: &str,
        image: &ImageAsset,
        params: GenerationParams,
    ) -> InferenceRequest {
        InferenceRequest {
            model_id: self.model_id.clone(),
            anthropic_version: self.anthropic_version.clone(),
            max_tokens: params.max_tokens,
            temperature: params.temperature,
            messages: vec![Message {
                role: "user".to_string(),
                content: vec![
                    ContentBlock::Image {
                        source: ImageBlockSource {
                            source_type: "base64".to_string(),
                            media_type: image.mime_type.clone(),
                            data: image.data.clone(),
                        },
                    },
                    ContentBlock::Text {
                        text: fill_template(template, description),
                    },
                ],
            }],
        }
    }
}

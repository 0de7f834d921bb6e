//! Sub-configuration structs with their defaults.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Target model and generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Bedrock model (or inference profile) identifier
    pub model_id: String,

    /// Value of the `anthropic_version` field in the request body
    pub anthropic_version: String,

    /// AWS region hosting the endpoint
    pub region: String,

    /// Default token budget for a caption
    pub max_tokens: u32,

    /// Default sampling temperature
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_id: "us.anthropic.claude-3-5-sonnet-20241022-v2:0".to_string(),
            anthropic_version: "bedrock-2023-05-31".to_string(),
            region: "us-east-2".to_string(),
            max_tokens: 512,
            temperature: 1.0,
        }
    }
}

/// Which transport carries the request to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// AWS SDK client, credentials from the default provider chain
    #[default]
    Bedrock,
    /// Plain HTTPS to the Bedrock runtime REST API with a bearer token
    Http,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Bedrock => write!(f, "bedrock"),
            BackendKind::Http => write!(f, "http"),
        }
    }
}

/// Inference transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,

    /// Endpoint override for the `http` backend.
    /// Defaults to `https://bedrock-runtime.{region}.amazonaws.com`.
    pub endpoint: Option<String>,

    /// Bearer token for the `http` backend (supports ${ENV_VAR} syntax)
    pub api_key: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Bedrock,
            endpoint: None,
            api_key: "${AWS_BEARER_TOKEN_BEDROCK}".to_string(),
        }
    }
}

/// On-disk layout of prompts and samples.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Project root. When unset, the nearest ancestor of the working
    /// directory containing a README.md is used.
    pub root: Option<PathBuf>,

    /// Prompt template used when the caller does not name one
    pub prompt_file: PathBuf,

    /// File name looked up under the conventional prompt directories
    pub prompt_file_name: String,

    /// Directory holding sample images and the manifest, relative to root
    pub samples_dir: PathBuf,

    /// Manifest file name inside `samples_dir`
    pub manifest_file: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            root: None,
            prompt_file: PathBuf::from("phase0/prompts/caption_generation_prompt.txt"),
            prompt_file_name: "caption_generation_prompt.txt".to_string(),
            samples_dir: PathBuf::from("phase0/samples"),
            manifest_file: "sample_descriptions.json".to_string(),
        }
    }
}

/// HTTP server settings for the cloud handler.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace
    pub level: String,

    /// Log format: "pretty" or "json"
    pub format: String,

    /// Log image and payload details (MIME, base64 length, previews) at debug level
    pub show_payload: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            show_payload: false,
        }
    }
}

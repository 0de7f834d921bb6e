//! Error types for the Framecap captioning pipeline.
//!
//! Pipeline errors carry enough context (attempted paths, HTTP status,
//! provider messages) to be reported verbatim to the caller once they are
//! folded into an [`InferenceResult`](crate::types::InferenceResult).

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::types::ErrorClass;

/// Error type for loading local data files such as the sample manifest.
///
/// Configuration problems surface as [`ConfigError`]. Pipeline problems never
/// escape as errors; they are folded into an
/// [`InferenceResult`](crate::types::InferenceResult).
#[derive(Error, Debug)]
pub enum FramecapError {
    /// General I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while resolving inputs, calling the model, or reading its reply.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No candidate location exists on disk.
    #[error("File not found: {} (tried: {})", .path.display(), format_attempts(.attempted))]
    NotFound {
        path: PathBuf,
        attempted: Vec<PathBuf>,
    },

    /// A resolved file could not be read.
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The inference endpoint could not be reached or rejected the call.
    #[error("{message}")]
    Transport {
        message: String,
        status_code: Option<u16>,
    },

    /// The response body is not the JSON document the model returns.
    #[error("Failed to parse model response: {0}")]
    Parse(String),

    /// The response parsed but `content[0].text` is absent.
    #[error("Model response has no text in content[0]")]
    MissingText,

    /// Anything else.
    #[error("{0}")]
    Unexpected(String),
}

impl PipelineError {
    /// Build a `NotFound` error for `path` after trying every candidate.
    pub fn not_found(path: &Path, attempted: Vec<PathBuf>) -> Self {
        Self::NotFound {
            path: path.to_path_buf(),
            attempted,
        }
    }

    /// Classification exposed to callers of the pipeline.
    pub fn class(&self) -> ErrorClass {
        match self {
            PipelineError::NotFound { .. } | PipelineError::Io { .. } => ErrorClass::FileError,
            PipelineError::Transport { .. } => ErrorClass::AwsError,
            PipelineError::Parse(_) | PipelineError::MissingText | PipelineError::Unexpected(_) => {
                ErrorClass::UnexpectedError
            }
        }
    }
}

fn format_attempts(attempted: &[PathBuf]) -> String {
    let list: Vec<String> = attempted
        .iter()
        .map(|p| format!("'{}'", p.display()))
        .collect();
    format!("[{}]", list.join(", "))
}

/// Convenience type alias for Framecap results.
pub type Result<T> = std::result::Result<T, FramecapError>;

/// Convenience type alias for pipeline-specific results.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_lists_every_attempt() {
        let err = PipelineError::not_found(
            Path::new("frame.jpg"),
            vec![
                PathBuf::from("frame.jpg"),
                PathBuf::from("/repo/phase0/samples/frame.jpg"),
                PathBuf::from("/repo/samples/frame.jpg"),
            ],
        );
        let msg = err.to_string();
        assert!(msg.starts_with("File not found: frame.jpg"));
        assert!(msg.contains("'/repo/phase0/samples/frame.jpg'"));
        assert!(msg.contains("'/repo/samples/frame.jpg'"));
    }

    #[test]
    fn test_classification() {
        let transport = PipelineError::Transport {
            message: "ThrottlingException".to_string(),
            status_code: Some(429),
        };
        assert_eq!(transport.class(), ErrorClass::AwsError);
        assert_eq!(
            PipelineError::not_found(Path::new("a"), vec![]).class(),
            ErrorClass::FileError
        );
        assert_eq!(PipelineError::MissingText.class(), ErrorClass::UnexpectedError);
        assert_eq!(
            PipelineError::Parse("eof".into()).class(),
            ErrorClass::UnexpectedError
        );
    }
}

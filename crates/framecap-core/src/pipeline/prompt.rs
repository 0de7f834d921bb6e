//! Prompt template loading.

use std::path::{Path, PathBuf};

use super::resolve::resolve;
use crate::error::{PipelineError, PipelineResult};

/// Token in a prompt template replaced by the video description.
pub const PLACEHOLDER: &str = "{video_description}";

/// Loads prompt templates from the given path or the conventional prompt
/// directories under the project root.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    root: PathBuf,
    file_name: String,
}

impl TemplateLoader {
    pub fn new(root: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            file_name: file_name.into(),
        }
    }

    /// Fallback locations tried after the requested path, in order.
    pub fn fallbacks(&self) -> Vec<PathBuf> {
        vec![
            self.root.join("phase0").join("prompts").join(&self.file_name),
            self.root.join("prompts").join(&self.file_name),
        ]
    }

    /// Resolve and read a template, trimming surrounding whitespace.
    pub async fn load(&self, path: &Path) -> PipelineResult<String> {
        let resolved = resolve(path, &self.fallbacks())?;
        let text = tokio::fs::read_to_string(&resolved)
            .await
            .map_err(|source| PipelineError::Io {
                path: resolved.clone(),
                source,
            })?;
        tracing::debug!("Loaded prompt template from {:?}", resolved);
        Ok(text.trim().to_string())
    }
}

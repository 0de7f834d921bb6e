//! Sample manifest for local batch runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::Result;

/// `{ "samples": [ { "id", "description", "image" }, ... ] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SampleManifest {
    #[serde(default)]
    pub samples: Vec<Sample>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Image path relative to the samples directory
    #[serde(default)]
    pub image: String,
}

impl Sample {
    pub fn label(&self) -> &str {
        self.id.as_deref().unwrap_or("unknown")
    }

    pub fn image_path(&self, samples_dir: &Path) -> PathBuf {
        samples_dir.join(&self.image)
    }
}

impl SampleManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

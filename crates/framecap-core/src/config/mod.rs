//! Configuration management for Framecap.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. Every value the pipeline used to hard-code (model identifier,
//! region, prompt and sample layout) lives here and is passed in at
//! construction time.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::pipeline::resolve::find_project_root;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides `model.region`.
pub const REGION_ENV_VAR: &str = "FRAMECAP_REGION";

/// Root configuration structure for Framecap.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Target model and generation defaults
    pub model: ModelConfig,

    /// Inference transport
    pub backend: BackendConfig,

    /// Prompt and sample file layout
    pub layout: LayoutConfig,

    /// Cloud handler server
    pub server: ServerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist. Environment
    /// overrides are applied either way.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        let mut config = if path.exists() {
            Self::load_from(&path)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.framecap.framecap/config.toml
    /// - Linux: ~/.config/framecap/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\framecap\config\config.toml
    ///
    /// Falls back to ~/.framecap/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "framecap", "framecap")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".framecap").join("config.toml")
            })
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(region) = std::env::var(REGION_ENV_VAR) {
            if !region.trim().is_empty() {
                tracing::debug!("Region overridden by {REGION_ENV_VAR}: {region}");
                self.model.region = region;
            }
        }
    }

    /// Resolved project root (with ~ expansion).
    pub fn project_root(&self) -> PathBuf {
        match &self.layout.root {
            Some(root) => expand(root),
            None => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                find_project_root(&cwd)
            }
        }
    }

    /// Default prompt template path, anchored at the project root when relative.
    pub fn prompt_path(&self) -> PathBuf {
        self.anchored(&self.layout.prompt_file)
    }

    /// Samples directory, anchored at the project root when relative.
    pub fn samples_dir(&self) -> PathBuf {
        self.anchored(&self.layout.samples_dir)
    }

    /// Endpoint for the `http` backend.
    pub fn http_endpoint(&self) -> String {
        self.backend.endpoint.clone().unwrap_or_else(|| {
            format!("https://bedrock-runtime.{}.amazonaws.com", self.model.region)
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    fn anchored(&self, path: &Path) -> PathBuf {
        let path = expand(path);
        if path.is_absolute() {
            path
        } else {
            self.project_root().join(path)
        }
    }
}

fn expand(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(
            config.model.model_id,
            "us.anthropic.claude-3-5-sonnet-20241022-v2:0"
        );
        assert_eq!(config.model.region, "us-east-2");
        assert_eq!(config.model.max_tokens, 512);
        assert_eq!(config.model.temperature, 1.0);
        assert_eq!(config.backend.kind, BackendKind::Bedrock);
    }

    #[test]
    fn test_config_to_toml() {
        let toml = Config::default().to_toml().unwrap();
        assert!(toml.contains("[model]"));
        assert!(toml.contains("[layout]"));
        assert!(toml.contains("anthropic_version = \"bedrock-2023-05-31\""));
    }

    #[test]
    fn test_load_from_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[model]\nregion = \"eu-west-1\"\n\n[backend]\nkind = \"http\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.model.region, "eu-west-1");
        assert_eq!(config.model.max_tokens, 512);
        assert_eq!(config.backend.kind, BackendKind::Http);
    }

    #[test]
    fn test_load_from_rejects_unknown_backend() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\nkind = \"carrier-pigeon\"\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_http_endpoint_follows_region() {
        let mut config = Config::default();
        config.model.region = "us-west-2".to_string();
        assert_eq!(
            config.http_endpoint(),
            "https://bedrock-runtime.us-west-2.amazonaws.com"
        );

        config.backend.endpoint = Some("http://localhost:9000".to_string());
        assert_eq!(config.http_endpoint(), "http://localhost:9000");
    }

    #[test]
    fn test_layout_paths_anchor_at_root() {
        let mut config = Config::default();
        config.layout.root = Some(PathBuf::from("/srv/captions"));
        assert_eq!(
            config.prompt_path(),
            PathBuf::from("/srv/captions/phase0/prompts/caption_generation_prompt.txt")
        );
        assert_eq!(
            config.samples_dir(),
            PathBuf::from("/srv/captions/phase0/samples")
        );
    }
}

//! The caption generator: template + image + description → caption.

use std::path::PathBuf;
use std::sync::Arc;

use super::image::{ImageIngestor, ImageSource};
use super::normalize::normalize;
use super::prompt::TemplateLoader;
use super::request::{GenerationParams, InferenceRequest, RequestBuilder};
use crate::config::Config;
use crate::error::PipelineResult;
use crate::llm::{BackendFactory, InferenceBackend};
use crate::types::InferenceResult;

const BASE64_PREVIEW_CHARS: usize = 100;
const PAYLOAD_PREVIEW_CHARS: usize = 800;

/// One captioning job.
#[derive(Debug, Clone)]
pub struct CaptionJob {
    pub image: ImageSource,
    pub description: String,
    /// Template path; the configured default when `None`.
    pub prompt_path: Option<PathBuf>,
    /// Generation parameters; the configured defaults when `None`.
    pub params: Option<GenerationParams>,
}

impl CaptionJob {
    pub fn new(image: ImageSource, description: impl Into<String>) -> Self {
        Self {
            image,
            description: description.into(),
            prompt_path: None,
            params: None,
        }
    }

    pub fn with_prompt(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_path = Some(path.into());
        self
    }

    pub fn with_params(mut self, params: GenerationParams) -> Self {
        self.params = Some(params);
        self
    }
}

/// Stateless captioning pipeline.
///
/// Every call loads its template and image fresh; the only shared piece is
/// the backend handle.
pub struct CaptionGenerator {
    backend: Arc<dyn InferenceBackend>,
    templates: TemplateLoader,
    images: ImageIngestor,
    requests: RequestBuilder,
    default_prompt: PathBuf,
    defaults: GenerationParams,
    show_payload: bool,
}

impl CaptionGenerator {
    /// Create a generator with the backend named in `config`.
    pub async fn new(config: &Config) -> Self {
        let backend = BackendFactory::create(config).await;
        Self::with_backend(config, backend)
    }

    /// Create a generator around an existing backend.
    pub fn with_backend(config: &Config, backend: Arc<dyn InferenceBackend>) -> Self {
        let root = config.project_root();
        tracing::debug!(
            "Caption generator: backend={}, model={}, root={:?}",
            backend.name(),
            config.model.model_id,
            root
        );
        Self {
            backend,
            templates: TemplateLoader::new(&root, &config.layout.prompt_file_name),
            images: ImageIngestor::new(&root),
            requests: RequestBuilder::from_config(&config.model),
            default_prompt: config.prompt_path(),
            defaults: GenerationParams::from(&config.model),
            show_payload: config.logging.show_payload,
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Resolve inputs and assemble the request without sending it.
    pub async fn prepare(&self, job: &CaptionJob) -> PipelineResult<InferenceRequest> {
        // Inputs first; a missing file never reaches the backend
        let prompt_path = job.prompt_path.as_ref().unwrap_or(&self.default_prompt);
        let template = self.templates.load(prompt_path).await?;
        let image = self.images.ingest(&job.image).await?;

        if self.show_payload {
            if let ImageSource::FromPath(path) = &job.image {
                tracing::debug!("Image path: {}", path.display());
            }
            tracing::debug!("Image MIME: {}", image.mime_type);
            tracing::debug!("Base64 length: {}", image.data.len());
            tracing::debug!(
                "Encoded image (first {} chars): {}",
                BASE64_PREVIEW_CHARS,
                preview(&image.data, BASE64_PREVIEW_CHARS)
            );
            tracing::debug!("Description: {}", job.description);
        }

        let params = job.params.unwrap_or(self.defaults);
        let request = self
            .requests
            .build(&template, &job.description, &image, params);

        if self.show_payload {
            if let Ok(json) = serde_json::to_string_pretty(&request) {
                tracing::debug!("Payload: {}", preview(&json, PAYLOAD_PREVIEW_CHARS));
            }
        }

        Ok(request)
    }

    /// Run the whole pipeline. Never fails: errors come back classified.
    pub async fn generate(&self, job: &CaptionJob) -> InferenceResult {
        let outcome = match self.prepare(job).await {
            Ok(request) => self.backend.invoke(&request).await,
            Err(e) => Err(e),
        };
        let result = normalize(outcome).await;
        if result.is_success() {
            tracing::info!("Caption generated via {}", self.backend.name());
        }
        result
    }
}

fn preview(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

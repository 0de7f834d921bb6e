//! Framecap Core - caption video frames with a hosted multimodal model.
//!
//! Framecap fills a prompt template with a video description, packages it
//! with a frame image into a single inference request, calls the model, and
//! unwraps the reply into a uniform result.
//!
//! # Architecture
//!
//! ```text
//! Template + Image + Description → Request → Backend → Envelope → InferenceResult
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use framecap_core::{CaptionGenerator, CaptionJob, Config, ImageSource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), framecap_core::ConfigError> {
//!     let config = Config::load()?;
//!     let generator = CaptionGenerator::new(&config).await;
//!
//!     let job = CaptionJob::new(ImageSource::FromPath("frame.jpg".into()), "A cat jumps");
//!     println!("{:?}", generator.generate(&job).await);
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod config;
pub mod error;
pub mod handler;
pub mod llm;
pub mod pipeline;
pub mod samples;
pub mod types;

// Re-exports for convenient access
pub use config::Config;
pub use error::{ConfigError, FramecapError, PipelineError, PipelineResult, Result};
pub use handler::{handle_event, HttpEvent, HttpResponse};
pub use llm::{BackendFactory, InferenceBackend, RawEnvelope};
pub use pipeline::{
    CaptionGenerator, CaptionJob, GenerationParams, ImageAsset, ImageSource, InferenceRequest,
};
pub use samples::{Sample, SampleManifest};
pub use types::{CaptionResponse, ErrorClass, InferenceResult};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

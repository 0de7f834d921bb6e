//! Captioning pipeline components.
//!
//! - **resolve**: first existing file among a path and its fallbacks
//! - **prompt**: prompt template loading
//! - **image**: image ingestion from disk or inline payloads
//! - **request**: placeholder substitution and request assembly
//! - **normalize**: response envelope → [`InferenceResult`](crate::InferenceResult)
//! - **generator**: orchestrates the full pipeline

pub mod generator;
pub mod image;
pub mod normalize;
pub mod prompt;
pub mod request;
pub mod resolve;

// Re-exports for convenient access
pub use generator::{CaptionGenerator, CaptionJob};
pub use image::{ingest_from_inline, mime_from_bytes, ImageAsset, ImageIngestor, ImageSource};
pub use normalize::{extract_caption, normalize};
pub use prompt::{TemplateLoader, PLACEHOLDER};
pub use request::{fill_template, GenerationParams, InferenceRequest, RequestBuilder};
pub use resolve::resolve;

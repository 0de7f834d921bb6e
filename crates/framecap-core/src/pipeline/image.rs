//! Image ingestion from disk or from inline base64 payloads.
//!
//! Both sources produce an [`ImageAsset`] holding the base64 text that goes
//! into the request, so downstream stages never know where the image came from.

use base64::Engine;
use image::ImageFormat;
use std::path::{Path, PathBuf};

use super::resolve::resolve;
use crate::error::{PipelineError, PipelineResult};

/// MIME type assumed for inline payloads without a `data:` header.
pub const DEFAULT_INLINE_MIME: &str = "image/jpeg";

/// MIME type used when a file extension is not recognised.
pub const UNKNOWN_MIME: &str = "application/octet-stream";

/// Where an image comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// A file on disk, resolved against the sample directories.
    FromPath(PathBuf),
    /// A base64 string, optionally prefixed with `data:<mime>;base64,`.
    FromInlinePayload(String),
    /// Raw image bytes already in memory (e.g. read from stdin).
    FromBytes(Vec<u8>),
}

/// Base64-encoded image ready to be placed in a request.
///
/// The encoded text is kept verbatim: inline payloads are never re-encoded
/// or whitespace-stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageAsset {
    /// Base64-encoded image bytes
    pub data: String,
    /// MIME type (e.g., "image/jpeg", "image/png")
    pub mime_type: String,
}

impl ImageAsset {
    pub fn new(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Encode raw bytes with the standard base64 alphabet.
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self::new(
            base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type,
        )
    }

    /// Decode the payload back to raw bytes.
    pub fn decode(&self) -> PipelineResult<Vec<u8>> {
        base64::engine::general_purpose::STANDARD
            .decode(&self.data)
            .map_err(|e| PipelineError::Unexpected(format!("Invalid base64 image data: {e}")))
    }
}

/// Infer a MIME type from the file extension.
pub fn mime_from_extension(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(UNKNOWN_MIME)
}

/// Sniff a MIME type from the leading magic bytes, defaulting to JPEG.
pub fn mime_from_bytes(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(DEFAULT_INLINE_MIME)
}

/// Split an inline payload into its MIME type and encoded section.
///
/// `data:<mime>;...,<data>` yields `<mime>` and everything after the first
/// comma. Anything else, including a `data:` prefix without a comma or with an
/// empty type, is treated as bare JPEG data.
pub fn ingest_from_inline(payload: &str) -> ImageAsset {
    if let Some(rest) = payload.strip_prefix("data:") {
        match rest.split_once(',') {
            Some((header, data)) => {
                let mime = header.split(';').next().unwrap_or_default().trim();
                if !mime.is_empty() {
                    return ImageAsset::new(data, mime);
                }
                tracing::warn!("Inline payload has an empty MIME marker, assuming {DEFAULT_INLINE_MIME}");
                return ImageAsset::new(data, DEFAULT_INLINE_MIME);
            }
            None => {
                tracing::warn!(
                    "Inline payload starts with 'data:' but has no ',' separator, assuming {DEFAULT_INLINE_MIME}"
                );
            }
        }
    }
    ImageAsset::new(payload, DEFAULT_INLINE_MIME)
}

/// Loads images from disk with fallbacks to the conventional sample directories.
#[derive(Debug, Clone)]
pub struct ImageIngestor {
    root: PathBuf,
}

impl ImageIngestor {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Fallback locations for `path`, keyed by its file name.
    pub fn fallbacks(&self, path: &Path) -> Vec<PathBuf> {
        let name = path.file_name().map(PathBuf::from).unwrap_or_default();
        vec![
            self.root.join("phase0").join("samples").join(&name),
            self.root.join("samples").join(&name),
        ]
    }

    /// Resolve, read and encode an image file.
    pub async fn ingest_from_disk(&self, path: &Path) -> PipelineResult<ImageAsset> {
        let resolved = resolve(path, &self.fallbacks(path))?;
        let bytes = tokio::fs::read(&resolved)
            .await
            .map_err(|source| PipelineError::Io {
                path: resolved.clone(),
                source,
            })?;
        let mime = mime_from_extension(&resolved);
        tracing::debug!(
            "Read {} bytes from {:?} ({})",
            bytes.len(),
            resolved,
            mime
        );
        Ok(ImageAsset::from_bytes(&bytes, mime))
    }

    /// Produce an asset from either source.
    pub async fn ingest(&self, source: &ImageSource) -> PipelineResult<ImageAsset> {
        match source {
            ImageSource::FromPath(path) => self.ingest_from_disk(path).await,
            ImageSource::FromInlinePayload(payload) => Ok(ingest_from_inline(payload)),
            ImageSource::FromBytes(bytes) => {
                Ok(ImageAsset::from_bytes(bytes, mime_from_bytes(bytes)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_data_uri() {
        let asset = ingest_from_inline("data:image/png;base64,AAAA");
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.data, "AAAA");
    }

    #[test]
    fn test_inline_bare_payload_defaults_to_jpeg() {
        let asset = ingest_from_inline("AAAA");
        assert_eq!(asset.mime_type, "image/jpeg");
        assert_eq!(asset.data, "AAAA");
    }

    #[test]
    fn test_inline_keeps_padding_and_whitespace() {
        let asset = ingest_from_inline("data:image/webp;base64,QUJD\nRA==");
        assert_eq!(asset.mime_type, "image/webp");
        assert_eq!(asset.data, "QUJD\nRA==");
    }

    #[test]
    fn test_inline_splits_on_first_comma_only() {
        let asset = ingest_from_inline("data:image/gif;base64,AA,BB");
        assert_eq!(asset.mime_type, "image/gif");
        assert_eq!(asset.data, "AA,BB");
    }

    #[test]
    fn test_inline_malformed_marker_falls_back() {
        let asset = ingest_from_inline("data:image/png;base64AAAA");
        assert_eq!(asset.mime_type, "image/jpeg");
        assert_eq!(asset.data, "data:image/png;base64AAAA");

        let asset = ingest_from_inline("data:;base64,AAAA");
        assert_eq!(asset.mime_type, "image/jpeg");
        assert_eq!(asset.data, "AAAA");
    }

    #[test]
    fn test_decode_round_trips_binary() {
        let bytes = [0u8, 0xFF, 0xD8, 0x3D, 0x00];
        let asset = ImageAsset::from_bytes(&bytes, "image/jpeg");
        assert_eq!(asset.decode().unwrap(), bytes);
    }

    #[test]
    fn test_mime_from_extension() {
        assert_eq!(mime_from_extension(Path::new("a.jpg")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a.JPEG")), "image/jpeg");
        assert_eq!(mime_from_extension(Path::new("a.png")), "image/png");
        assert_eq!(mime_from_extension(Path::new("a.webp")), "image/webp");
        assert_eq!(mime_from_extension(Path::new("a.xyz")), UNKNOWN_MIME);
        assert_eq!(mime_from_extension(Path::new("noext")), UNKNOWN_MIME);
    }

    #[tokio::test]
    async fn test_ingest_from_disk_uses_sample_fallback() {
        let dir = tempfile::tempdir().unwrap();
        let samples = dir.path().join("samples");
        std::fs::create_dir_all(&samples).unwrap();
        std::fs::write(samples.join("frame.png"), [1u8, 2, 3]).unwrap();

        let ingestor = ImageIngestor::new(dir.path());
        let asset = ingestor
            .ingest(&ImageSource::FromPath(PathBuf::from("elsewhere/frame.png")))
            .await
            .unwrap();
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.decode().unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_mime_from_bytes_sniffs_magic() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(mime_from_bytes(&png), "image/png");
        assert_eq!(mime_from_bytes(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(mime_from_bytes(b"not an image"), DEFAULT_INLINE_MIME);
    }

    #[tokio::test]
    async fn test_ingest_in_memory_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path());
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 1, 2];
        let asset = ingestor
            .ingest(&ImageSource::FromBytes(png.clone()))
            .await
            .unwrap();
        assert_eq!(asset.mime_type, "image/png");
        assert_eq!(asset.decode().unwrap(), png);
    }

    #[tokio::test]
    async fn test_ingest_from_disk_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let ingestor = ImageIngestor::new(dir.path());
        let err = ingestor
            .ingest_from_disk(Path::new("gone.jpg"))
            .await
            .unwrap_err();
        match err {
            PipelineError::NotFound { attempted, .. } => assert_eq!(attempted.len(), 3),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}

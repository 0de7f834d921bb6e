//! Inference transports.
//!
//! Provides a backend abstraction over the AWS SDK Bedrock client and a plain
//! HTTPS client for the same REST API.

pub(crate) mod backend;
pub(crate) mod bedrock;
pub(crate) mod http;

pub use backend::{
    resolve_env_var, BackendFactory, InferenceBackend, MaterializedBody, RawEnvelope,
    ResponseBody,
};
pub use bedrock::BedrockBackend;
pub use http::{HttpBackend, StreamingBody};

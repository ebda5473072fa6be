//! Backend capability trait and implementations.

pub mod http;

#[cfg(feature = "google")]
pub mod google;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Result};
use crate::models::ImageModel;
use crate::types::{AspectRatio, ImageData, VideoHandle};

/// One piece of multimodal request content.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    Image(ImageData),
}

/// A text (optionally structured-output) generation call.
#[derive(Debug, Clone)]
pub struct TextRequest {
    pub model: String,
    pub parts: Vec<ContentPart>,
    /// Ask for `application/json` output.
    pub json_output: bool,
    /// Schema contract for structured output.
    pub response_schema: Option<serde_json::Value>,
}

impl TextRequest {
    pub fn text(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            parts: vec![ContentPart::Text(prompt.into())],
            json_output: false,
            response_schema: None,
        }
    }
}

/// Image synthesis constraints shared by every image-capable model.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageRequest {
    pub prompt: String,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageEditRequest {
    pub model: String,
    pub image: ImageData,
    pub instruction: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VideoRequest {
    pub model: String,
    pub prompt: String,
    pub seed_image: Option<ImageData>,
    pub aspect_ratio: AspectRatio,
    pub resolution: String,
}

/// State of a long-running video job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoOperation {
    /// Operation resource name used for polling.
    pub name: String,
    pub done: bool,
    pub video_uri: Option<String>,
}

/// Capabilities the orchestrator needs from a generative backend.
///
/// Implementations classify their failures into [`AdcraftError`] variants
/// at this boundary; callers never inspect message text.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Backend name (e.g. "google").
    fn provider_name(&self) -> &str;

    /// Generate text. May return an empty string; callers decide usability.
    async fn generate_text(&self, request: &TextRequest) -> Result<String>;

    /// Synthesize one image. Fails with `NoMediaReturned` when the response
    /// carries no image payload.
    async fn synthesize_image(&self, model: &ImageModel, request: &ImageRequest) -> Result<ImageData>;

    async fn edit_image(&self, request: &ImageEditRequest) -> Result<ImageData>;

    /// Submit a video job.
    async fn start_video(&self, request: &VideoRequest) -> Result<VideoOperation>;

    /// Fetch the current state of a video job.
    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation>;

    /// Authenticated download of finished media.
    async fn download_media(&self, uri: &str) -> Result<VideoHandle>;
}

/// Create the default backend for the given config.
#[allow(unused_variables)]
pub fn create_backend(config: &AdcraftConfig) -> Result<Arc<dyn GenerativeBackend>> {
    #[cfg(feature = "google")]
    {
        return Ok(Arc::new(google::GoogleBackend::new(config)?));
    }
    #[allow(unreachable_code)]
    Err(AdcraftError::Configuration(
        "no backend enabled via feature flags".into(),
    ))
}

//! Shared test helpers and a scripted mock backend.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use adcraft::config::AdcraftConfig;
use adcraft::error::{AdcraftError, Result};
use adcraft::models::ImageModel;
use adcraft::provider::{
    ContentPart, GenerativeBackend, ImageEditRequest, ImageRequest, TextRequest, VideoOperation, VideoRequest,
};
use adcraft::types::{ImageData, VideoHandle};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Text { model: String },
    Image { model: String, prompt: String },
    Edit { model: String },
    StartVideo { model: String },
    PollVideo { name: String },
    Download { uri: String },
}

/// A backend whose answers are queued per call kind (and per model for text
/// and images). Unscripted calls fail with a 500.
#[derive(Default)]
pub struct MockBackend {
    text: Mutex<HashMap<String, VecDeque<Result<String>>>>,
    images: Mutex<HashMap<String, VecDeque<Result<ImageData>>>>,
    edits: Mutex<VecDeque<Result<ImageData>>>,
    video_starts: Mutex<VecDeque<Result<VideoOperation>>>,
    polls: Mutex<VecDeque<Result<VideoOperation>>>,
    downloads: Mutex<VecDeque<Result<VideoHandle>>>,
    calls: Mutex<Vec<Call>>,
    text_requests: Mutex<Vec<TextRequest>>,
    video_requests: Mutex<Vec<VideoRequest>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn queue_text(&self, model: &str, result: Result<String>) -> &Self {
        self.text
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn queue_image(&self, model: &str, result: Result<ImageData>) -> &Self {
        self.images
            .lock()
            .unwrap()
            .entry(model.to_string())
            .or_default()
            .push_back(result);
        self
    }

    pub fn queue_edit(&self, result: Result<ImageData>) -> &Self {
        self.edits.lock().unwrap().push_back(result);
        self
    }

    pub fn queue_video_start(&self, result: Result<VideoOperation>) -> &Self {
        self.video_starts.lock().unwrap().push_back(result);
        self
    }

    pub fn queue_poll(&self, result: Result<VideoOperation>) -> &Self {
        self.polls.lock().unwrap().push_back(result);
        self
    }

    pub fn queue_download(&self, result: Result<VideoHandle>) -> &Self {
        self.downloads.lock().unwrap().push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn text_requests(&self) -> Vec<TextRequest> {
        self.text_requests.lock().unwrap().clone()
    }

    pub fn video_requests(&self) -> Vec<VideoRequest> {
        self.video_requests.lock().unwrap().clone()
    }

    /// Models called for text, in order.
    pub fn text_models(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Text { model } => Some(model),
                _ => None,
            })
            .collect()
    }

    /// Models called for images, in order.
    pub fn image_models(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Image { model, .. } => Some(model),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unscripted(what: &str) -> AdcraftError {
    AdcraftError::api(500, format!("unscripted {what} call"))
}

#[async_trait]
impl GenerativeBackend for MockBackend {
    fn provider_name(&self) -> &str {
        "mock"
    }

    async fn generate_text(&self, request: &TextRequest) -> Result<String> {
        self.record(Call::Text {
            model: request.model.clone(),
        });
        self.text_requests.lock().unwrap().push(request.clone());
        self.text
            .lock()
            .unwrap()
            .get_mut(&request.model)
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(unscripted("text")))
    }

    async fn synthesize_image(&self, model: &ImageModel, request: &ImageRequest) -> Result<ImageData> {
        self.record(Call::Image {
            model: model.as_str().to_string(),
            prompt: request.prompt.clone(),
        });
        self.images
            .lock()
            .unwrap()
            .get_mut(model.as_str())
            .and_then(|q| q.pop_front())
            .unwrap_or_else(|| Err(unscripted("image")))
    }

    async fn edit_image(&self, request: &ImageEditRequest) -> Result<ImageData> {
        self.record(Call::Edit {
            model: request.model.clone(),
        });
        self.edits
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("edit")))
    }

    async fn start_video(&self, request: &VideoRequest) -> Result<VideoOperation> {
        self.record(Call::StartVideo {
            model: request.model.clone(),
        });
        self.video_requests.lock().unwrap().push(request.clone());
        self.video_starts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("start_video")))
    }

    async fn poll_video(&self, operation_name: &str) -> Result<VideoOperation> {
        self.record(Call::PollVideo {
            name: operation_name.to_string(),
        });
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("poll_video")))
    }

    async fn download_media(&self, uri: &str) -> Result<VideoHandle> {
        self.record(Call::Download { uri: uri.to_string() });
        self.downloads
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("download")))
    }
}

/// Config with short model names, a key, and no pacing.
pub fn test_config() -> AdcraftConfig {
    AdcraftConfig::new()
        .with_api_key("test-key")
        .with_copy_models(["copy-a", "copy-b", "copy-c"])
        .with_image_models(["gemini-img", "imagen-a", "imagen-b"])
        .with_slide_pause(Duration::ZERO)
        .with_video_poll_interval(Duration::from_secs(10))
}

pub fn png(byte: u8) -> ImageData {
    ImageData::new(vec![0x89, b'P', b'N', b'G', byte], "image/png")
}

pub fn credential_error() -> AdcraftError {
    AdcraftError::CredentialInvalid("API key not valid".into())
}

pub fn operation(name: &str, done: bool, uri: Option<&str>) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done,
        video_uri: uri.map(str::to_string),
    }
}

/// Text of every text part of a request, joined.
pub fn request_text(request: &TextRequest) -> String {
    request
        .parts
        .iter()
        .filter_map(|p| match p {
            ContentPart::Text(t) => Some(t.as_str()),
            ContentPart::Image(_) => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Carousel copy JSON with `count` slides, each carrying a CTA.
pub fn copy_json(count: usize) -> String {
    let slides: Vec<serde_json::Value> = (0..count)
        .map(|i| {
            serde_json::json!({
                "headline": format!("Titular *{}*", i + 1),
                "subHeadline": format!("Sub {}", i + 1),
                "cta": "COMPRA",
                "visualPrompt": format!("scene {}", i + 1),
                "layout": "centered",
                "textAlign": "center"
            })
        })
        .collect();
    serde_json::json!({ "title": "Campaña", "slides": slides }).to_string()
}

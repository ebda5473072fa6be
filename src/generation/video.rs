//! Long-running video generation: submit, poll, download.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Result};
use crate::provider::{GenerativeBackend, VideoRequest};
use crate::types::{AspectRatio, ImageData, VideoHandle};

/// Output resolution requested from the video backend.
pub const VIDEO_RESOLUTION: &str = "720p";

/// Inputs for animating a creative.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoOptions {
    pub prompt: String,
    /// Optional first frame.
    pub seed_image: Option<ImageData>,
    /// Collapsed to 16:9 or 9:16 before submission.
    pub aspect_ratio: AspectRatio,
}

/// Progress reported while a video job runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoProgress {
    Submitting,
    /// Waiting on the backend; `poll` counts completed polls.
    Processing { poll: u32 },
    Downloading,
}

impl VideoProgress {
    /// Short localized status line.
    pub fn message(&self) -> &'static str {
        match self {
            Self::Submitting => "Iniciando Veo...",
            Self::Processing { .. } => "Renderizando video (esto toma unos segundos)...",
            Self::Downloading => "Descargando video...",
        }
    }
}

/// Submit a video job and wait for the result.
///
/// Polls every `config.video_poll_interval()` until the job reports done,
/// then downloads the media with the configured credential. Cancelling
/// `cancel` stops the wait with [`AdcraftError::Cancelled`]; there is no
/// overall deadline otherwise.
pub async fn generate_video(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    options: &VideoOptions,
    progress: &(dyn Fn(VideoProgress) + Send + Sync),
    cancel: &CancellationToken,
) -> Result<VideoHandle> {
    if cancel.is_cancelled() {
        return Err(AdcraftError::Cancelled);
    }

    let request = VideoRequest {
        model: config.video_model.clone(),
        prompt: options.prompt.clone(),
        seed_image: options.seed_image.clone(),
        aspect_ratio: options.aspect_ratio.video_ratio(),
        resolution: VIDEO_RESOLUTION.to_string(),
    };

    progress(VideoProgress::Submitting);
    let mut operation = backend.start_video(&request).await?;
    info!(operation = %operation.name, model = %request.model, "Video job submitted");

    let interval = config.video_poll_interval();
    let mut poll = 0u32;
    while !operation.done {
        progress(VideoProgress::Processing { poll });
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(operation = %operation.name, "Video job cancelled");
                return Err(AdcraftError::Cancelled);
            }
            _ = tokio::time::sleep(interval) => {}
        }
        operation = backend.poll_video(&operation.name).await?;
        poll += 1;
        debug!(operation = %operation.name, poll, done = operation.done, "Video job polled");
    }

    let uri = operation
        .video_uri
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| AdcraftError::NoMediaReturned("no video link returned".into()))?;

    progress(VideoProgress::Downloading);
    let video = backend.download_media(&uri).await?;
    if video.is_empty() {
        return Err(AdcraftError::NoMediaReturned("downloaded video is empty".into()));
    }
    info!(bytes = video.len(), polls = poll, "Video downloaded");
    Ok(video)
}

//! Slide image synthesis, batch generation and image edits.

use std::time::Duration;

use tracing::{info, warn};

use super::fallback::FallbackExecutor;
use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Capability, FailureSignal, Result};
use crate::models::parse_image_models;
use crate::provider::{GenerativeBackend, ImageEditRequest, ImageRequest};
use crate::types::{AdProject, AspectRatio, ImageData, SlidePatch};

/// Marker stored on a slide whose image could not be produced.
pub const IMAGE_ERROR_MARKER: &str = "Error de IA";

/// Synthesize one image, falling back across `config.image_models`.
pub async fn generate_slide_image(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    prompt: &str,
    aspect_ratio: AspectRatio,
) -> Result<ImageData> {
    let models = parse_image_models(&config.image_models)?;
    let request = ImageRequest {
        prompt: prompt.to_string(),
        aspect_ratio,
    };

    let success = FallbackExecutor::new(Capability::ImageGeneration)
        .run(&models, |model| {
            let model = model.clone();
            let request = &request;
            async move {
                let image = backend.synthesize_image(&model, request).await?;
                if image.is_empty() {
                    return Err(AdcraftError::NoMediaReturned(format!(
                        "empty image payload from {model}"
                    )));
                }
                Ok(image)
            }
        })
        .await?;

    info!(model = %success.model, attempts = success.attempts, "Image generated");
    Ok(success.value)
}

/// Result of synthesizing one slide of a batch.
#[derive(Debug)]
pub enum SlideImageOutcome {
    Generated(ImageData),
    Failed {
        error: AdcraftError,
        signal: FailureSignal,
    },
}

impl SlideImageOutcome {
    pub fn is_generated(&self) -> bool {
        matches!(self, Self::Generated(_))
    }
}

/// Synthesize images for every prompt in order.
///
/// Slides are processed one at a time with `config.slide_pause()` between
/// them. A failed slide never aborts the batch; its outcome is recorded and
/// the next slide proceeds.
pub async fn generate_batch(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    prompts: &[String],
    aspect_ratio: AspectRatio,
) -> Vec<SlideImageOutcome> {
    let pause = config.slide_pause();
    let mut outcomes = Vec::with_capacity(prompts.len());

    for (index, prompt) in prompts.iter().enumerate() {
        if index > 0 && pause > Duration::ZERO {
            tokio::time::sleep(pause).await;
        }
        match generate_slide_image(backend, config, prompt, aspect_ratio).await {
            Ok(image) => outcomes.push(SlideImageOutcome::Generated(image)),
            Err(error) => {
                warn!(slide = index, error = %error, "Slide image failed");
                let signal = error.failure_signal();
                outcomes.push(SlideImageOutcome::Failed { error, signal });
            }
        }
    }

    let generated = outcomes.iter().filter(|o| o.is_generated()).count();
    info!(total = prompts.len(), generated, "Batch finished");
    outcomes
}

/// A slide whose image could not be produced.
#[derive(Debug)]
pub struct SlideFailure {
    pub index: usize,
    pub signal: FailureSignal,
    pub error: AdcraftError,
}

/// Project revision after a batch, with the slides that failed.
#[derive(Debug)]
pub struct ImageBatch {
    pub project: AdProject,
    pub failures: Vec<SlideFailure>,
}

impl ImageBatch {
    pub fn credential_rejected(&self) -> bool {
        self.failures
            .iter()
            .any(|f| f.signal == FailureSignal::CredentialInvalid)
    }

    /// The revision, or the first rejected-credential error seen in the batch.
    ///
    /// Other slide failures stay recorded on the slides and do not fail.
    pub fn into_result(self) -> Result<AdProject> {
        match self
            .failures
            .into_iter()
            .find(|f| f.signal == FailureSignal::CredentialInvalid)
        {
            Some(failure) => Err(failure.error),
            None => Ok(self.project),
        }
    }
}

/// New project revision with batch outcomes applied slide by slide.
///
/// Outcomes beyond the project's slide count are ignored.
pub fn apply_batch(project: &AdProject, outcomes: Vec<SlideImageOutcome>) -> ImageBatch {
    let mut next = project.clone();
    let mut failures = Vec::new();
    for (index, (slide, outcome)) in next.slides.iter_mut().zip(outcomes).enumerate() {
        let patch = match outcome {
            SlideImageOutcome::Generated(image) => SlidePatch::image(image),
            SlideImageOutcome::Failed { error, signal } => {
                failures.push(SlideFailure { index, signal, error });
                SlidePatch::image_error(IMAGE_ERROR_MARKER)
            }
        };
        *slide = patch.apply_to(slide);
    }
    ImageBatch {
        project: next,
        failures,
    }
}

/// Apply a natural-language edit to an existing image.
pub async fn edit_image(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    image: &ImageData,
    instruction: &str,
) -> Result<ImageData> {
    if instruction.trim().is_empty() {
        return Err(AdcraftError::InvalidArgument("edit instruction is empty".into()));
    }
    let request = ImageEditRequest {
        model: config.edit_model.clone(),
        image: image.clone(),
        instruction: instruction.trim().to_string(),
    };
    let edited = backend.edit_image(&request).await?;
    if edited.is_empty() {
        return Err(AdcraftError::NoMediaReturned("no image data returned from edit".into()));
    }
    info!(model = %config.edit_model, "Image edited");
    Ok(edited)
}

//! Entry point tying config, backend and generation steps together.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Result};
use crate::generation::{self, ImageBatch, ImagePromptSpec, RewriteTone, SlideCopyContext, VideoOptions, VideoProgress};
use crate::provider::{self, GenerativeBackend};
use crate::types::{AdProject, AspectRatio, CopyResult, GenerationRequest, ImageData, SlidePatch, VideoHandle};

/// Coarse progress of a full project generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum GenerationStatus {
    #[default]
    Idle,
    GeneratingCopy,
    GeneratingVisuals,
    Done,
    Error,
}

/// Generates ad creatives with an explicit config and backend.
///
/// The orchestrator never reads the environment; build the config with
/// [`AdcraftConfig::from_env`] or a file loader first.
#[derive(Clone)]
pub struct Orchestrator {
    config: AdcraftConfig,
    backend: Arc<dyn GenerativeBackend>,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("config", &self.config)
            .field("backend", &self.backend.provider_name())
            .finish()
    }
}

impl Orchestrator {
    pub fn new(config: AdcraftConfig, backend: Arc<dyn GenerativeBackend>) -> Self {
        Self { config, backend }
    }

    /// Build with the default backend for the enabled features.
    pub fn from_config(config: AdcraftConfig) -> Result<Self> {
        config.validate()?;
        let backend = provider::create_backend(&config)?;
        Ok(Self::new(config, backend))
    }

    pub fn config(&self) -> &AdcraftConfig {
        &self.config
    }

    pub fn backend(&self) -> &Arc<dyn GenerativeBackend> {
        &self.backend
    }

    /// Generate normalized copy for a brief.
    pub async fn generate_copy(&self, request: &GenerationRequest) -> Result<CopyResult> {
        generation::generate_ad_copy(self.backend.as_ref(), &self.config, request).await
    }

    /// Generate copy and build the first project revision (no images yet).
    pub async fn create_project(&self, request: &GenerationRequest) -> Result<AdProject> {
        let copy = self.generate_copy(request).await?;
        Ok(AdProject::from_copy(request, copy))
    }

    /// Synthesize every slide image.
    ///
    /// Every slide is attempted. Failures are recorded on the slide and
    /// listed in the returned batch with their signal.
    pub async fn generate_images(&self, project: &AdProject) -> ImageBatch {
        let prompts: Vec<String> = project
            .slides
            .iter()
            .map(|slide| generation::compose_image_prompt(&ImagePromptSpec::for_slide(project, slide)))
            .collect();
        let outcomes =
            generation::generate_batch(self.backend.as_ref(), &self.config, &prompts, project.aspect_ratio).await;
        generation::apply_batch(project, outcomes)
    }

    /// Copy then visuals, reporting coarse status along the way.
    ///
    /// Slide failures are marked on the slides, except a rejected
    /// credential, which fails the whole call once the batch has finished.
    pub async fn generate_project(
        &self,
        request: &GenerationRequest,
        on_status: &(dyn Fn(GenerationStatus) + Send + Sync),
    ) -> Result<AdProject> {
        on_status(GenerationStatus::GeneratingCopy);
        let project = match self.create_project(request).await {
            Ok(project) => project,
            Err(e) => {
                on_status(GenerationStatus::Error);
                return Err(e);
            }
        };

        on_status(GenerationStatus::GeneratingVisuals);
        let batch = self.generate_images(&project).await;
        if batch.credential_rejected() {
            warn!(project = %project.id, "Credential rejected during image generation");
            on_status(GenerationStatus::Error);
        }
        let project = batch.into_result()?;
        info!(project = %project.id, slides = project.slides.len(), "Project generated");
        on_status(GenerationStatus::Done);
        Ok(project)
    }

    /// Synthesize a single image from a finished prompt.
    pub async fn generate_slide_image(&self, prompt: &str, aspect_ratio: AspectRatio) -> Result<ImageData> {
        generation::generate_slide_image(self.backend.as_ref(), &self.config, prompt, aspect_ratio).await
    }

    /// Re-synthesize one slide's image.
    ///
    /// Credential failures propagate; any other failure is recorded on the
    /// slide like a batch failure.
    pub async fn regenerate_slide_image(&self, project: &AdProject, index: usize) -> Result<AdProject> {
        let slide = project.slide(index)?;
        let prompt = generation::compose_image_prompt(&ImagePromptSpec::for_slide(project, slide));
        let patch = match self.generate_slide_image(&prompt, project.aspect_ratio).await {
            Ok(image) => SlidePatch::image(image),
            Err(e) if e.is_credential_invalid() => return Err(e),
            Err(e) => {
                warn!(slide = index, error = %e, "Slide image regeneration failed");
                SlidePatch::image_error(generation::IMAGE_ERROR_MARKER)
            }
        };
        project.with_slide(index, &patch)
    }

    pub async fn enhance_prompt(&self, raw: &str) -> Result<String> {
        generation::enhance_prompt(self.backend.as_ref(), &self.config, raw).await
    }

    pub async fn magic_rewrite(&self, text: &str, tone: RewriteTone) -> Result<String> {
        generation::magic_rewrite(self.backend.as_ref(), &self.config, text, tone).await
    }

    /// Rewrite one slide's copy and return the resulting revision.
    pub async fn regenerate_slide_copy(&self, project: &AdProject, index: usize) -> Result<AdProject> {
        let context = SlideCopyContext::from_project(project, index)?;
        let copy = generation::regenerate_slide_copy(self.backend.as_ref(), &self.config, &context).await?;
        project.with_slide(index, &SlidePatch::copy(copy))
    }

    pub async fn edit_image(&self, image: &ImageData, instruction: &str) -> Result<ImageData> {
        generation::edit_image(self.backend.as_ref(), &self.config, image, instruction).await
    }

    /// Edit a slide's current background and return the resulting revision.
    pub async fn edit_slide_image(&self, project: &AdProject, index: usize, instruction: &str) -> Result<AdProject> {
        let image = project.slide(index)?.background_image.as_ref().ok_or_else(|| {
            AdcraftError::InvalidArgument(format!("slide {index} has no image to edit"))
        })?;
        let edited = self.edit_image(image, instruction).await?;
        project.with_slide(index, &SlidePatch::image(edited))
    }

    pub async fn generate_video(
        &self,
        options: &VideoOptions,
        progress: &(dyn Fn(VideoProgress) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<VideoHandle> {
        generation::generate_video(self.backend.as_ref(), &self.config, options, progress, cancel).await
    }
}

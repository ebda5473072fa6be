//! Project revisions consumed by the presentation layer.
//!
//! Every update is a pure function from the previous revision and a patch to
//! a new revision. Nothing here mutates a slide or project in place, so a
//! revision handed to a renderer or persisted to history stays valid.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::copy::{CopyResult, Layout, SlideCopy, SlideDraft, TextAlign};
use super::media::ImageData;
use super::request::{AspectRatio, BrandContext, ContentIntent, ContentMode, GenerationRequest, TextMode, VisualStyle};
use crate::error::{AdcraftError, Result};

/// Accent of the first built-in color theme.
pub const DEFAULT_ACCENT_COLOR: &str = "#22d3ee";
pub const DEFAULT_PRIMARY_COLOR: &str = "#000000";
pub const DEFAULT_PROJECT_TITLE: &str = "Nueva Campaña";

/// Text anchor in percent of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextPosition {
    pub x: f32,
    pub y: f32,
}

/// Live CSS-filter style adjustments, in percent (blur in px).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageAdjustments {
    pub brightness: u16,
    pub contrast: u16,
    pub saturation: u16,
    pub blur: u16,
}

impl Default for ImageAdjustments {
    fn default() -> Self {
        Self {
            brightness: 100,
            contrast: 100,
            saturation: 100,
            blur: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: String,
    pub headline: String,
    pub sub_headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    pub visual_prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<ImageData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_error: Option<String>,
    pub layout: Layout,
    pub text_align: TextAlign,
    pub text_position: TextPosition,
    pub overlay_opacity: f32,
    pub headline_size: u16,
    pub headline_color: String,
    pub highlight_color: String,
    pub sub_headline_size: u16,
    pub sub_headline_color: String,
    #[serde(default)]
    pub adjustments: ImageAdjustments,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_uri: Option<String>,
    #[serde(default)]
    pub is_winner: bool,
}

impl Slide {
    fn from_draft(index: usize, draft: SlideDraft, mode: ContentMode, style: VisualStyle, accent: &str) -> Self {
        let single = mode == ContentMode::SingleImage;
        Self {
            id: format!("slide-{index}"),
            text_position: TextPosition {
                x: 50.0,
                y: draft.layout.default_text_y(),
            },
            headline: draft.headline,
            sub_headline: draft.sub_headline,
            cta: draft.cta,
            visual_prompt: draft.visual_prompt,
            background_image: None,
            image_error: None,
            layout: draft.layout,
            text_align: draft.text_align,
            overlay_opacity: style.preset().default_overlay,
            headline_size: if single { 56 } else { 42 },
            headline_color: "#ffffff".to_string(),
            highlight_color: accent.to_string(),
            sub_headline_size: if single { 18 } else { 14 },
            sub_headline_color: "#cccccc".to_string(),
            adjustments: ImageAdjustments::default(),
            angle_label: draft.angle_label,
            video_uri: None,
            is_winner: false,
        }
    }
}

/// Partial update for one slide. `None` leaves a field untouched; the nested
/// options on nullable fields allow clearing them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlidePatch {
    pub headline: Option<String>,
    pub sub_headline: Option<String>,
    pub cta: Option<Option<String>>,
    pub visual_prompt: Option<String>,
    pub background_image: Option<Option<ImageData>>,
    pub image_error: Option<Option<String>>,
    pub layout: Option<Layout>,
    pub text_align: Option<TextAlign>,
    pub text_position: Option<TextPosition>,
    pub overlay_opacity: Option<f32>,
    pub adjustments: Option<ImageAdjustments>,
    pub video_uri: Option<Option<String>>,
    pub is_winner: Option<bool>,
}

impl SlidePatch {
    /// Set a new background and clear any previous error marker.
    pub fn image(image: ImageData) -> Self {
        Self {
            background_image: Some(Some(image)),
            image_error: Some(None),
            ..Default::default()
        }
    }

    /// Mark the slide's image as failed, dropping any stale background.
    pub fn image_error(message: impl Into<String>) -> Self {
        Self {
            background_image: Some(None),
            image_error: Some(Some(message.into())),
            ..Default::default()
        }
    }

    pub fn copy(copy: SlideCopy) -> Self {
        Self {
            headline: Some(copy.headline),
            sub_headline: Some(copy.sub_headline),
            cta: copy.cta.map(Some),
            ..Default::default()
        }
    }

    pub fn apply_to(&self, slide: &Slide) -> Slide {
        let mut next = slide.clone();
        if let Some(v) = &self.headline {
            next.headline = v.clone();
        }
        if let Some(v) = &self.sub_headline {
            next.sub_headline = v.clone();
        }
        if let Some(v) = &self.cta {
            next.cta = v.clone();
        }
        if let Some(v) = &self.visual_prompt {
            next.visual_prompt = v.clone();
        }
        if let Some(v) = &self.background_image {
            next.background_image = v.clone();
        }
        if let Some(v) = &self.image_error {
            next.image_error = v.clone();
        }
        if let Some(v) = self.layout {
            next.layout = v;
        }
        if let Some(v) = self.text_align {
            next.text_align = v;
        }
        if let Some(v) = self.text_position {
            next.text_position = v;
        }
        if let Some(v) = self.overlay_opacity {
            next.overlay_opacity = v.clamp(0.0, 1.0);
        }
        if let Some(v) = self.adjustments {
            next.adjustments = v;
        }
        if let Some(v) = &self.video_uri {
            next.video_uri = v.clone();
        }
        if let Some(v) = self.is_winner {
            next.is_winner = v;
        }
        next
    }
}

/// Partial update for project-level settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub accent_color: Option<String>,
    pub primary_color: Option<String>,
    pub aspect_ratio: Option<AspectRatio>,
    pub visual_style: Option<VisualStyle>,
    pub text_mode: Option<TextMode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdProject {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub goal: String,
    pub intent: ContentIntent,
    pub mode: ContentMode,
    pub visual_style: VisualStyle,
    pub aspect_ratio: AspectRatio,
    pub text_mode: TextMode,
    #[serde(default)]
    pub brand: BrandContext,
    pub primary_color: String,
    pub accent_color: String,
    /// Accent explicitly requested for baked text, if any.
    #[serde(default)]
    pub user_accent_color: Option<String>,
    #[serde(default)]
    pub font_family: Option<String>,
    pub slides: Vec<Slide>,
}

impl AdProject {
    /// Build the first revision from a normalized copy result.
    pub fn from_copy(request: &GenerationRequest, copy: CopyResult) -> Self {
        let accent = request
            .accent_color
            .clone()
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_string());
        let title = if copy.title.trim().is_empty() {
            DEFAULT_PROJECT_TITLE.to_string()
        } else {
            copy.title
        };
        let slides = copy
            .slides
            .into_iter()
            .enumerate()
            .map(|(i, draft)| Slide::from_draft(i, draft, request.mode, request.style, &accent))
            .collect();

        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            created_at: Utc::now(),
            title,
            goal: request.brief.clone(),
            intent: request.intent,
            mode: request.mode,
            visual_style: request.style,
            aspect_ratio: request.aspect_ratio,
            text_mode: request.text_mode,
            brand: request.brand.clone(),
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            accent_color: accent,
            user_accent_color: request.accent_color.clone(),
            font_family: request.font_family.clone(),
            slides,
        }
    }

    pub fn slide(&self, index: usize) -> Result<&Slide> {
        self.slides.get(index).ok_or_else(|| {
            AdcraftError::InvalidArgument(format!(
                "slide index {index} out of range (project has {} slides)",
                self.slides.len()
            ))
        })
    }

    /// New revision with one slide patched.
    pub fn with_slide(&self, index: usize, patch: &SlidePatch) -> Result<Self> {
        let updated = patch.apply_to(self.slide(index)?);
        let mut next = self.clone();
        next.slides[index] = updated;
        Ok(next)
    }

    /// New revision with project settings patched.
    pub fn apply(&self, patch: &ProjectPatch) -> Self {
        let mut next = self.clone();
        if let Some(v) = &patch.title {
            next.title = v.clone();
        }
        if let Some(v) = &patch.accent_color {
            next.accent_color = v.clone();
        }
        if let Some(v) = &patch.primary_color {
            next.primary_color = v.clone();
        }
        if let Some(v) = patch.aspect_ratio {
            next.aspect_ratio = v;
        }
        if let Some(v) = patch.visual_style {
            next.visual_style = v;
        }
        if let Some(v) = patch.text_mode {
            next.text_mode = v;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_project(mode: ContentMode) -> AdProject {
        let request = GenerationRequest::builder()
            .brief("Curso online")
            .mode(mode)
            .style(VisualStyle::Luxury)
            .build();
        let copy = CopyResult {
            title: String::new(),
            slides: vec![
                SlideDraft {
                    headline: "Uno".into(),
                    layout: Layout::BottomHeavy,
                    ..Default::default()
                },
                SlideDraft {
                    headline: "Dos".into(),
                    cta: Some("COMPRA".into()),
                    layout: Layout::TopHeavy,
                    ..Default::default()
                },
            ],
        };
        AdProject::from_copy(&request, copy)
    }

    #[test]
    fn from_copy_applies_layout_and_style_defaults() {
        let project = sample_project(ContentMode::Carousel);
        assert_eq!(project.title, DEFAULT_PROJECT_TITLE);
        assert_eq!(project.slides[0].id, "slide-0");
        assert_eq!(project.slides[0].text_position.y, 75.0);
        assert_eq!(project.slides[1].text_position.y, 25.0);
        assert_eq!(project.slides[0].overlay_opacity, 0.7);
        assert_eq!(project.slides[0].headline_size, 42);
        assert_eq!(project.slides[1].cta.as_deref(), Some("COMPRA"));
    }

    #[test]
    fn single_image_uses_larger_type() {
        let project = sample_project(ContentMode::SingleImage);
        assert_eq!(project.slides[0].headline_size, 56);
        assert_eq!(project.slides[0].sub_headline_size, 18);
    }

    #[test]
    fn slide_patch_returns_new_revision_without_touching_previous() {
        let before = sample_project(ContentMode::Carousel);
        let image = ImageData::new(vec![1], "image/png");
        let after = before.with_slide(1, &SlidePatch::image(image.clone())).unwrap();

        assert_eq!(before.slides[1].background_image, None);
        assert_eq!(after.slides[1].background_image, Some(image));
        assert_eq!(after.slides[0], before.slides[0]);
    }

    #[test]
    fn image_error_patch_clears_background() {
        let project = sample_project(ContentMode::Carousel)
            .with_slide(0, &SlidePatch::image(ImageData::new(vec![1], "image/png")))
            .unwrap()
            .with_slide(0, &SlidePatch::image_error("Error de IA"))
            .unwrap();
        assert_eq!(project.slides[0].background_image, None);
        assert_eq!(project.slides[0].image_error.as_deref(), Some("Error de IA"));
    }

    #[test]
    fn out_of_range_slide_is_rejected() {
        let project = sample_project(ContentMode::Carousel);
        let err = project.with_slide(9, &SlidePatch::default()).unwrap_err();
        assert!(matches!(err, AdcraftError::InvalidArgument(_)));
    }

    #[test]
    fn copy_patch_keeps_cta_when_none_returned() {
        let project = sample_project(ContentMode::Carousel);
        let patch = SlidePatch::copy(SlideCopy {
            headline: "Nuevo".into(),
            sub_headline: "Sub".into(),
            cta: None,
        });
        let next = project.with_slide(1, &patch).unwrap();
        assert_eq!(next.slides[1].headline, "Nuevo");
        assert_eq!(next.slides[1].cta.as_deref(), Some("COMPRA"));
    }

    #[test]
    fn project_patch_is_pure() {
        let before = sample_project(ContentMode::Carousel);
        let after = before.apply(&ProjectPatch {
            accent_color: Some("#ef4444".into()),
            ..Default::default()
        });
        assert_eq!(before.accent_color, DEFAULT_ACCENT_COLOR);
        assert_eq!(after.accent_color, "#ef4444");
        assert_eq!(after.id, before.id);
    }
}

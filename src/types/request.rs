//! Creative brief and the enums that steer generation.

use bon::Builder;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::media::ImageData;

/// What kind of creative is generated from one brief.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentMode {
    SingleImage,
    #[default]
    Carousel,
    /// One draft per marketing angle.
    AnglesBatch,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ContentIntent {
    #[default]
    PaidAds,
    OrganicValue,
    ViralHook,
}

/// Whether text is drawn by the client or rendered inside the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TextMode {
    #[default]
    Overlay,
    Baked,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    #[strum(serialize = "1:1")]
    Square,
    #[serde(rename = "4:3")]
    #[strum(serialize = "4:3")]
    Landscape4x3,
    #[serde(rename = "16:9")]
    #[strum(serialize = "16:9")]
    Widescreen,
    #[serde(rename = "9:16")]
    #[strum(serialize = "9:16")]
    Vertical,
    #[serde(rename = "3:4")]
    #[strum(serialize = "3:4")]
    Portrait3x4,
}

impl AspectRatio {
    /// The only two ratios the video backend accepts.
    pub fn video_ratio(self) -> AspectRatio {
        match self {
            Self::Vertical | Self::Portrait3x4 => Self::Vertical,
            _ => Self::Widescreen,
        }
    }
}

/// Named rendering aesthetic used as an image prompt prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum VisualStyle {
    Brutalism,
    Neon,
    #[default]
    Clean,
    Organic,
    PopArt,
    Luxury,
    Meme,
    #[serde(rename = "3d-clay")]
    #[strum(serialize = "3d-clay")]
    Clay3d,
}

/// Prompt prefix and display defaults for a [`VisualStyle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StylePreset {
    pub name: &'static str,
    pub prompt_prefix: &'static str,
    pub default_overlay: f32,
}

impl VisualStyle {
    pub const ALL: [VisualStyle; 8] = [
        Self::Brutalism,
        Self::Neon,
        Self::Clean,
        Self::Organic,
        Self::PopArt,
        Self::Luxury,
        Self::Meme,
        Self::Clay3d,
    ];

    pub fn preset(self) -> StylePreset {
        match self {
            Self::Brutalism => StylePreset {
                name: "Brutalismo",
                prompt_prefix: "Brutalist graphic design, high contrast, raw unedited photography style, harsh flash, bold composition, disruptive, scroll-stopping, highly saturated accents.",
                default_overlay: 0.4,
            },
            Self::Neon => StylePreset {
                name: "Neon Cyber",
                prompt_prefix: "Cyberpunk aesthetic, dark background, glowing neon accents, highly stylized, futuristic, moody lighting, high end 3d render style.",
                default_overlay: 0.6,
            },
            Self::Clean => StylePreset {
                name: "Corporate Clean",
                prompt_prefix: "Ultra clean corporate aesthetic, minimalist, lots of negative space, bright soft lighting, professional photography, trustworthy, modern SaaS style.",
                default_overlay: 0.3,
            },
            Self::Organic => StylePreset {
                name: "Orgánico",
                prompt_prefix: "Earthy tones, soft natural sunlight, organic textures, lifestyle photography, authentic, warm, approachable, film camera aesthetic.",
                default_overlay: 0.2,
            },
            Self::PopArt => StylePreset {
                name: "Pop Art",
                prompt_prefix: "Pop art style, extremely vibrant colors, comic book halftone patterns, playful, energetic, highly saturated, bold outlines.",
                default_overlay: 0.4,
            },
            Self::Luxury => StylePreset {
                name: "Dark Luxury",
                prompt_prefix: "Dark luxury aesthetic, moody studio lighting, elegant, premium, high-end editorial fashion photography style, black and gold tones.",
                default_overlay: 0.7,
            },
            Self::Meme => StylePreset {
                name: "Viral / Low-fi",
                prompt_prefix: "Low-fi internet aesthetic, disposable camera flash, chaotic energy, relatable, unpolished, viral social media style.",
                default_overlay: 0.5,
            },
            Self::Clay3d => StylePreset {
                name: "3D Clay",
                prompt_prefix: "3D claymorphism render, soft matte materials, pastel colors, cute, friendly, smooth lighting, trendy UI illustration style.",
                default_overlay: 0.3,
            },
        }
    }
}

/// Brand facts injected into the copy brief.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandContext {
    pub name: String,
    pub niche: String,
    pub target_audience: String,
    pub tone: String,
}

/// A creative brief, built per user action and discarded afterwards.
///
/// ```
/// use adcraft::types::{ContentMode, GenerationRequest, TextMode};
///
/// let request = GenerationRequest::builder()
///     .brief("Curso de finanzas personales")
///     .mode(ContentMode::SingleImage)
///     .text_mode(TextMode::Baked)
///     .build();
/// assert_eq!(request.mode, ContentMode::SingleImage);
/// ```
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
pub struct GenerationRequest {
    #[builder(into)]
    pub brief: String,
    #[builder(default)]
    pub mode: ContentMode,
    #[builder(default)]
    pub intent: ContentIntent,
    #[builder(default)]
    pub style: VisualStyle,
    #[builder(default)]
    pub aspect_ratio: AspectRatio,
    #[builder(default)]
    pub text_mode: TextMode,
    #[builder(default)]
    pub brand: BrandContext,
    pub reference_image: Option<ImageData>,
    #[builder(into)]
    pub knowledge_base: Option<String>,
    /// Overrides the default gold/yellow accent in baked prompts.
    #[builder(into)]
    pub accent_color: Option<String>,
    #[builder(into)]
    pub font_family: Option<String>,
}

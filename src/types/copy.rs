//! Structured ad copy returned by the copy-generation backends.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Layout {
    #[default]
    Centered,
    BottomHeavy,
    TopHeavy,
    SplitVertical,
}

impl Layout {
    pub const ALL: [Layout; 4] = [
        Self::Centered,
        Self::BottomHeavy,
        Self::TopHeavy,
        Self::SplitVertical,
    ];

    /// Default vertical text position (percent from the top).
    pub fn default_text_y(self) -> f32 {
        match self {
            Self::BottomHeavy => 75.0,
            Self::TopHeavy => 25.0,
            _ => 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

impl TextAlign {
    pub const ALL: [TextAlign; 3] = [Self::Left, Self::Center, Self::Right];
}

/// One slide as drafted by the model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideDraft {
    /// May contain one `*word*` emphasis span.
    pub headline: String,
    #[serde(default)]
    pub sub_headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
    #[serde(default)]
    pub visual_prompt: String,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub layout: Layout,
    #[serde(default, deserialize_with = "lenient_enum")]
    pub text_align: TextAlign,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle_label: Option<String>,
}

impl SlideDraft {
    /// Whether the slide carries a non-blank call-to-action.
    pub fn has_cta(&self) -> bool {
        self.cta.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

/// Title plus ordered slides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CopyResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slides: Vec<SlideDraft>,
}

/// Replacement copy for a single slide.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideCopy {
    pub headline: String,
    #[serde(default)]
    pub sub_headline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta: Option<String>,
}

/// Unknown or null enum values fall back to the default instead of failing
/// the whole slide.
fn lenient_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|value| value.trim().to_ascii_lowercase().parse().ok())
        .unwrap_or_default())
}

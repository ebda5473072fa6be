//! Backend model catalogue and candidate priority lists.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AdcraftError;

/// Copy generation candidates, fastest/cheapest first.
pub const DEFAULT_COPY_MODELS: &[&str] = &["gemini-2.0-flash", "gemini-1.5-flash", "gemini-1.5-pro"];

/// Image synthesis candidates.
pub const DEFAULT_IMAGE_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "imagen-3-generate-001",
    "imagen-4.0-generate-001",
];

pub const DEFAULT_TEXT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Request shape an image-capable model speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageModelKind {
    /// Dedicated image model behind `:predict`.
    Imagen,
    /// Multimodal model returning inline image parts from `:generateContent`.
    GeminiMultimodal,
}

/// An image-capable model, classified once when parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageModel {
    id: String,
    kind: ImageModelKind,
}

impl ImageModel {
    pub fn new(id: impl Into<String>, kind: ImageModelKind) -> Self {
        Self { id: id.into(), kind }
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ImageModelKind {
        self.kind
    }
}

impl FromStr for ImageModel {
    type Err = AdcraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim();
        if id.is_empty() {
            return Err(AdcraftError::InvalidArgument("empty image model id".into()));
        }
        let kind = if id.starts_with("imagen") {
            ImageModelKind::Imagen
        } else {
            ImageModelKind::GeminiMultimodal
        };
        Ok(Self::new(id, kind))
    }
}

impl fmt::Display for ImageModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parse a configured list of image model ids.
pub fn parse_image_models(ids: &[String]) -> Result<Vec<ImageModel>, AdcraftError> {
    ids.iter().map(|id| id.parse()).collect()
}

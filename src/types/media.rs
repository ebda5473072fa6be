//! Image and video payloads exchanged with the backend and the UI.

use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{AdcraftError, Result};

const ENGINE: base64::engine::GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Raw image bytes with their MIME type.
///
/// Serializes as a `data:` URI, the form the presentation layer displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageData {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Decode a base64 payload as returned inline by the backend.
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> Result<Self> {
        let bytes = ENGINE
            .decode(data.trim())
            .map_err(|e| AdcraftError::DecodeInvalid(format!("invalid base64 image: {e}")))?;
        Ok(Self::new(bytes, mime_type))
    }

    /// Parse `data:<mime>;base64,<payload>`. A bare base64 string is accepted
    /// and treated as PNG unless the prefix says otherwise.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        match uri.split_once(',') {
            Some((header, payload)) => {
                let mime = header
                    .strip_prefix("data:")
                    .and_then(|rest| rest.split(';').next())
                    .filter(|m| !m.is_empty())
                    .unwrap_or("image/png");
                Self::from_base64(payload, mime)
            }
            None => Self::from_base64(uri, "image/png"),
        }
    }

    pub fn to_base64(&self) -> String {
        ENGINE.encode(&self.bytes)
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.to_base64())
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Serialize for ImageData {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_uri())
    }
}

impl<'de> Deserialize<'de> for ImageData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let uri = String::deserialize(deserializer)?;
        Self::from_data_uri(&uri).map_err(serde::de::Error::custom)
    }
}

/// A finished video, downloaded and held locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoHandle {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    /// Where the backend served the media from.
    pub source_uri: String,
}

impl VideoHandle {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, ENGINE.encode(&self.bytes))
    }

    /// Write the video to disk, creating parent directories.
    pub async fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, &self.bytes).await?;
        Ok(())
    }
}

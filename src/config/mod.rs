//! Configuration (layered: code > TOML file > env loader).
//!
//! The orchestrator only ever sees an [`AdcraftConfig`] value. Reading the
//! process environment is an explicit, caller-side step via
//! [`AdcraftConfig::from_env`].

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AdcraftError, Result};
use crate::models;

/// Default Google Generative Language endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Explicit configuration handed to the orchestrator and backends.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdcraftConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    /// Priority list for copy generation, cheapest first.
    pub copy_models: Vec<String>,
    /// Priority list for image synthesis.
    pub image_models: Vec<String>,
    /// Model for enhancement, rewrites and slide-copy regeneration.
    pub text_model: String,
    pub edit_model: String,
    pub video_model: String,
    pub request_timeout_secs: u64,
    /// Pause between slides when synthesizing a batch.
    pub slide_pause_ms: u64,
    pub video_poll_interval_secs: u64,
    pub history_max_items: usize,
    /// Serialized history larger than this triggers the emergency trim.
    pub history_quota_bytes: usize,
}

impl fmt::Debug for AdcraftConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdcraftConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("copy_models", &self.copy_models)
            .field("image_models", &self.image_models)
            .field("text_model", &self.text_model)
            .field("edit_model", &self.edit_model)
            .field("video_model", &self.video_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("slide_pause_ms", &self.slide_pause_ms)
            .field("video_poll_interval_secs", &self.video_poll_interval_secs)
            .field("history_max_items", &self.history_max_items)
            .field("history_quota_bytes", &self.history_quota_bytes)
            .finish()
    }
}

impl Default for AdcraftConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            copy_models: to_owned_list(models::DEFAULT_COPY_MODELS),
            image_models: to_owned_list(models::DEFAULT_IMAGE_MODELS),
            text_model: models::DEFAULT_TEXT_MODEL.to_string(),
            edit_model: models::DEFAULT_EDIT_MODEL.to_string(),
            video_model: models::DEFAULT_VIDEO_MODEL.to_string(),
            request_timeout_secs: 120,
            slide_pause_ms: 200,
            video_poll_interval_secs: 10,
            history_max_items: 5,
            history_quota_bytes: 5 * 1024 * 1024,
        }
    }
}

fn to_owned_list(models: &[&str]) -> Vec<String> {
    models.iter().map(|m| m.to_string()).collect()
}

impl AdcraftConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from environment variables (and `.env` if present).
    ///
    /// Checks `GEMINI_API_KEY`, `GOOGLE_API_KEY`, then `API_KEY`. A missing
    /// credential is only a warning: calls fail later with a credential error.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let mut config = Self::new();

        for env_var in ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"] {
            if let Ok(key) = std::env::var(env_var) {
                if !key.trim().is_empty() {
                    config.api_key = Some(key);
                    break;
                }
            }
        }
        if let Ok(url) = std::env::var("ADCRAFT_BASE_URL") {
            config.base_url = url;
        }

        config.warn_if_missing_credential();
        config
    }

    /// Load from a TOML file. Unset fields keep their defaults.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| AdcraftError::Configuration(format!("invalid config file: {e}")))?;
        config.validate()?;
        config.warn_if_missing_credential();
        Ok(config)
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_copy_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.copy_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_image_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.image_models = models.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_slide_pause(mut self, pause: Duration) -> Self {
        self.slide_pause_ms = pause.as_millis() as u64;
        self
    }

    pub fn with_video_poll_interval(mut self, interval: Duration) -> Self {
        self.video_poll_interval_secs = interval.as_secs();
        self
    }

    pub fn has_credentials(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn slide_pause(&self) -> Duration {
        Duration::from_millis(self.slide_pause_ms)
    }

    pub fn video_poll_interval(&self) -> Duration {
        Duration::from_secs(self.video_poll_interval_secs)
    }

    /// Reject configurations the fallback executor cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.copy_models.is_empty() {
            return Err(AdcraftError::Configuration("copy_models must not be empty".into()));
        }
        if self.image_models.is_empty() {
            return Err(AdcraftError::Configuration("image_models must not be empty".into()));
        }
        if self.history_max_items == 0 {
            return Err(AdcraftError::Configuration("history_max_items must be at least 1".into()));
        }
        Ok(())
    }

    fn warn_if_missing_credential(&self) {
        if !self.has_credentials() {
            tracing::warn!("API key not found. Set GEMINI_API_KEY or provide api_key in the config");
        }
    }
}

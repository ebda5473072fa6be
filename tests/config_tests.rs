//! Tests for configuration loading.

use std::sync::{Mutex, OnceLock};
use std::time::Duration;

use adcraft::config::{AdcraftConfig, DEFAULT_BASE_URL};
use adcraft::error::AdcraftError;
use adcraft::models::{ImageModelKind, DEFAULT_COPY_MODELS};
use adcraft::orchestrator::Orchestrator;

static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const CONFIG_ENV_VARS: [&str; 4] = ["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY", "ADCRAFT_BASE_URL"];

struct EnvGuard {
    saved: Vec<(String, Option<String>)>,
}

impl EnvGuard {
    fn capture(keys: &[&str]) -> Self {
        let saved = keys
            .iter()
            .map(|key| ((*key).to_string(), std::env::var(key).ok()))
            .collect();
        Self { saved }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }
}

fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
    ENV_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn clean_env() -> (std::sync::MutexGuard<'static, ()>, EnvGuard) {
    let lock = env_lock_guard();
    let guard = EnvGuard::capture(&CONFIG_ENV_VARS);
    for key in CONFIG_ENV_VARS {
        std::env::remove_var(key);
    }
    (lock, guard)
}

#[test]
fn from_env_prefers_gemini_key() {
    let _env = clean_env();
    std::env::set_var("GOOGLE_API_KEY", "google-key");
    std::env::set_var("GEMINI_API_KEY", "gemini-key");
    std::env::set_var("ADCRAFT_BASE_URL", "http://localhost:9999/v1beta");

    let config = AdcraftConfig::from_env();

    assert_eq!(config.api_key.as_deref(), Some("gemini-key"));
    assert_eq!(config.base_url, "http://localhost:9999/v1beta");
}

#[test]
fn from_env_falls_back_to_generic_key_and_skips_blank_values() {
    let _env = clean_env();
    std::env::set_var("GEMINI_API_KEY", "   ");
    std::env::set_var("API_KEY", "generic-key");

    let config = AdcraftConfig::from_env();
    assert_eq!(config.api_key.as_deref(), Some("generic-key"));
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
}

#[test]
fn missing_key_is_not_a_construction_error() {
    let _env = clean_env();
    let config = AdcraftConfig::from_env();
    assert!(!config.has_credentials());
    assert!(Orchestrator::from_config(config).is_ok());
}

#[test]
fn orchestrator_rejects_empty_candidate_lists() {
    let config = AdcraftConfig::new().with_copy_models(Vec::<String>::new());
    let err = Orchestrator::from_config(config).unwrap_err();
    assert!(matches!(err, AdcraftError::Configuration(_)));
}

#[test]
fn builder_setters_cover_pacing() {
    let config = AdcraftConfig::new()
        .with_slide_pause(Duration::from_millis(50))
        .with_video_poll_interval(Duration::from_secs(3));
    assert_eq!(config.slide_pause(), Duration::from_millis(50));
    assert_eq!(config.video_poll_interval(), Duration::from_secs(3));
    assert_eq!(config.copy_models, DEFAULT_COPY_MODELS);
}

#[test]
fn default_image_models_mix_both_request_shapes() {
    let config = AdcraftConfig::new();
    let kinds: Vec<ImageModelKind> = adcraft::models::parse_image_models(&config.image_models)
        .unwrap()
        .iter()
        .map(|m| m.kind())
        .collect();
    assert!(kinds.contains(&ImageModelKind::GeminiMultimodal));
    assert!(kinds.contains(&ImageModelKind::Imagen));
}

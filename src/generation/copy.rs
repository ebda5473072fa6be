//! Copy generation, brief enhancement and single-slide rewrites.

use tracing::{info, warn};

use super::fallback::FallbackExecutor;
use super::normalize::{decode_copy, decode_json, post_process, strip_wrapping_quotes};
use super::prompt::{
    compose_copy_brief, compose_enhance_prompt, compose_regenerate_prompt, compose_rewrite_prompt,
    copy_response_schema, RewriteTone, SlideCopyContext,
};
use crate::config::AdcraftConfig;
use crate::error::{AdcraftError, Capability, Result};
use crate::provider::{GenerativeBackend, TextRequest};
use crate::types::{CopyResult, GenerationRequest, SlideCopy};

/// Generate normalized ad copy, falling back across `config.copy_models`.
///
/// Empty or undecodable output counts as a failed attempt for that model.
pub async fn generate_ad_copy(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    request: &GenerationRequest,
) -> Result<CopyResult> {
    let parts = compose_copy_brief(request);
    let schema = copy_response_schema();

    let success = FallbackExecutor::new(Capability::CopyGeneration)
        .run(&config.copy_models, |model| {
            let text_request = TextRequest {
                model: model.clone(),
                parts: parts.clone(),
                json_output: true,
                response_schema: Some(schema.clone()),
            };
            async move {
                let raw = backend.generate_text(&text_request).await?;
                if raw.trim().is_empty() {
                    return Err(AdcraftError::DecodeInvalid("empty response text".into()));
                }
                decode_copy(&raw)
            }
        })
        .await?;

    info!(
        model = %success.model,
        attempts = success.attempts,
        slides = success.value.slides.len(),
        mode = %request.mode,
        "Copy generated"
    );
    Ok(post_process(success.value, request.mode))
}

/// Run a one-shot text call; any non-credential failure or empty answer
/// degrades to `None`.
async fn best_effort_text(backend: &dyn GenerativeBackend, request: TextRequest) -> Result<Option<String>> {
    match backend.generate_text(&request).await {
        Ok(text) => {
            let cleaned = strip_wrapping_quotes(&text);
            Ok((!cleaned.is_empty()).then_some(cleaned))
        }
        Err(e) if e.is_credential_invalid() => Err(e),
        Err(e) => {
            warn!(model = %request.model, error = %e, "Text call failed, keeping original");
            Ok(None)
        }
    }
}

/// Rewrite a raw brief into a concise marketing prompt.
///
/// Never fails except on credential errors; otherwise the input is returned
/// unchanged.
pub async fn enhance_prompt(backend: &dyn GenerativeBackend, config: &AdcraftConfig, raw: &str) -> Result<String> {
    if raw.trim().is_empty() {
        return Ok(raw.to_string());
    }
    let request = TextRequest::text(&config.text_model, compose_enhance_prompt(raw));
    Ok(best_effort_text(backend, request)
        .await?
        .unwrap_or_else(|| raw.to_string()))
}

/// Rewrite one line of copy in the given tone, degrading like [`enhance_prompt`].
pub async fn magic_rewrite(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    text: &str,
    tone: RewriteTone,
) -> Result<String> {
    if text.trim().is_empty() {
        return Ok(text.to_string());
    }
    let request = TextRequest::text(&config.text_model, compose_rewrite_prompt(text, tone));
    Ok(best_effort_text(backend, request)
        .await?
        .unwrap_or_else(|| text.to_string()))
}

/// Regenerate headline, sub-headline and CTA for one slide.
pub async fn regenerate_slide_copy(
    backend: &dyn GenerativeBackend,
    config: &AdcraftConfig,
    context: &SlideCopyContext,
) -> Result<SlideCopy> {
    let mut request = TextRequest::text(&config.text_model, compose_regenerate_prompt(context));
    request.json_output = true;

    let raw = backend.generate_text(&request).await?;
    let copy: SlideCopy = decode_json(&raw)?;
    if copy.headline.trim().is_empty() {
        return Err(AdcraftError::DecodeInvalid("regenerated copy has no headline".into()));
    }
    info!(slide = context.slide_index, "Slide copy regenerated");
    Ok(copy)
}

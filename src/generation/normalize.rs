//! Response normalization: JSON extraction, validation, post-processing.

use serde::de::DeserializeOwned;

use crate::error::{AdcraftError, Result};
use crate::types::{ContentMode, CopyResult};

/// CTA synthesized for the last carousel slide.
pub const DEFAULT_CAROUSEL_CTA: &str = "SABER MÁS";
/// CTA synthesized for a single-image creative.
pub const DEFAULT_SINGLE_IMAGE_CTA: &str = "CLICK AQUÍ";

/// Best-effort extraction of a JSON object from model output.
///
/// Takes everything from the first `{` to the last `}` inclusive. Without
/// such a pair, strips a leading/trailing code fence instead. This is not a
/// parser; a bad substring fails later at decode time.
pub fn extract_json(raw: &str) -> String {
    if raw.trim().is_empty() {
        return "{}".to_string();
    }
    if let (Some(first), Some(last)) = (raw.find('{'), raw.rfind('}')) {
        if first < last {
            return raw[first..=last].to_string();
        }
    }
    strip_code_fences(raw)
}

fn strip_code_fences(text: &str) -> String {
    let trimmed = text.trim();
    let without_opening = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_closing = without_opening
        .trim_end()
        .strip_suffix("```")
        .unwrap_or(without_opening);
    without_closing.trim().to_string()
}

/// Extract and decode a JSON payload into `T`.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let json = extract_json(raw);
    serde_json::from_str(&json).map_err(|e| AdcraftError::DecodeInvalid(format!("{e}")))
}

/// Decode a copy result and require at least one slide.
pub fn decode_copy(raw: &str) -> Result<CopyResult> {
    let copy: CopyResult = decode_json(raw)?;
    if copy.slides.is_empty() {
        return Err(AdcraftError::DecodeInvalid(
            "invalid slides structure from AI".into(),
        ));
    }
    Ok(copy)
}

/// Enforce the per-mode CTA invariants.
///
/// - carousel: only the last slide carries a CTA, defaulted if absent;
/// - single-image: the sole slide carries a CTA, defaulted if absent;
/// - angles-batch: left as drafted.
pub fn post_process(mut copy: CopyResult, mode: ContentMode) -> CopyResult {
    match mode {
        ContentMode::Carousel => {
            let last = copy.slides.len().saturating_sub(1);
            for (index, slide) in copy.slides.iter_mut().enumerate() {
                if index < last {
                    slide.cta = None;
                } else if !slide.has_cta() {
                    slide.cta = Some(DEFAULT_CAROUSEL_CTA.to_string());
                }
            }
        }
        ContentMode::SingleImage => {
            if let Some(slide) = copy.slides.first_mut() {
                if !slide.has_cta() {
                    slide.cta = Some(DEFAULT_SINGLE_IMAGE_CTA.to_string());
                }
            }
        }
        ContentMode::AnglesBatch => {}
    }
    copy
}

/// Strip one pair of wrapping quotes from a one-line model answer.
pub fn strip_wrapping_quotes(text: &str) -> String {
    let trimmed = text.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SlideDraft;
    use pretty_assertions::assert_eq;

    fn slide(cta: Option<&str>) -> SlideDraft {
        SlideDraft {
            headline: "h".into(),
            cta: cta.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn extracts_object_from_prose_and_fences() {
        let raw = "Here is the result:\n```json\n{\"title\":\"X\",\"slides\":[]}\n```\nThanks";
        assert_eq!(extract_json(raw), r#"{"title":"X","slides":[]}"#);
    }

    #[test]
    fn extraction_spans_first_to_last_brace() {
        let raw = r#"a {"x": {"y": 1}} b"#;
        assert_eq!(extract_json(raw), r#"{"x": {"y": 1}}"#);
    }

    #[test]
    fn without_braces_falls_back_to_fence_stripping() {
        assert_eq!(extract_json("```json\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(extract_json("```\nplain\n```"), "plain");
        assert_eq!(extract_json("   "), "{}");
    }

    #[test]
    fn reversed_braces_are_not_a_pair() {
        assert_eq!(extract_json("} nope {"), "} nope {");
    }

    #[test]
    fn missing_slides_is_invalid_structure() {
        let err = decode_copy(r#"{"title":"X","slides":[]}"#).unwrap_err();
        assert!(matches!(err, AdcraftError::DecodeInvalid(ref m) if m.contains("slides")));
        let err = decode_copy(r#"{"title":"X"}"#).unwrap_err();
        assert!(matches!(err, AdcraftError::DecodeInvalid(_)));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        assert!(matches!(
            decode_copy("the model refused"),
            Err(AdcraftError::DecodeInvalid(_))
        ));
    }

    #[test]
    fn carousel_keeps_cta_only_on_last_slide() {
        let copy = CopyResult {
            title: "t".into(),
            slides: vec![slide(Some("A")), slide(Some("B")), slide(None)],
        };
        let out = post_process(copy, ContentMode::Carousel);
        assert_eq!(out.slides[0].cta, None);
        assert_eq!(out.slides[1].cta, None);
        assert_eq!(out.slides[2].cta.as_deref(), Some(DEFAULT_CAROUSEL_CTA));
    }

    #[test]
    fn carousel_last_slide_cta_is_preserved() {
        let copy = CopyResult {
            title: "t".into(),
            slides: vec![slide(None), slide(Some("COMPRA YA"))],
        };
        let out = post_process(copy, ContentMode::Carousel);
        assert_eq!(out.slides[1].cta.as_deref(), Some("COMPRA YA"));
    }

    #[test]
    fn single_image_gets_default_cta_only_when_missing() {
        let out = post_process(
            CopyResult {
                title: "t".into(),
                slides: vec![slide(None)],
            },
            ContentMode::SingleImage,
        );
        assert_eq!(out.slides[0].cta.as_deref(), Some(DEFAULT_SINGLE_IMAGE_CTA));

        let out = post_process(
            CopyResult {
                title: "t".into(),
                slides: vec![slide(Some("RESERVA"))],
            },
            ContentMode::SingleImage,
        );
        assert_eq!(out.slides[0].cta.as_deref(), Some("RESERVA"));
    }

    #[test]
    fn angles_batch_is_untouched() {
        let copy = CopyResult {
            title: "t".into(),
            slides: vec![slide(Some("A")), slide(None)],
        };
        assert_eq!(post_process(copy.clone(), ContentMode::AnglesBatch), copy);
    }

    #[test]
    fn wrapping_quotes_are_removed() {
        assert_eq!(strip_wrapping_quotes("  \"Hola mundo\"\n"), "Hola mundo");
        assert_eq!(strip_wrapping_quotes("sin comillas"), "sin comillas");
    }
}

//! Prompt composition for copy briefs and image synthesis.

use std::sync::LazyLock;

use bon::Builder;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use strum::{Display, EnumString};

use crate::provider::ContentPart;
use crate::types::{
    AdProject, ContentIntent, ContentMode, GenerationRequest, Layout, Slide, TextAlign, TextMode, VisualStyle,
};

/// Knowledge-base text beyond this many characters is dropped.
pub const KNOWLEDGE_BASE_LIMIT: usize = 1000;

static EMPHASIS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*([^*]+)\*").expect("emphasis regex must compile")
});

/// Remove `*` emphasis markers from a headline.
pub fn strip_emphasis(headline: &str) -> String {
    headline.replace('*', "").trim().to_string()
}

/// The first `*word*` span of a headline, if any.
pub fn emphasis_word(headline: &str) -> Option<String> {
    EMPHASIS_RE
        .captures(headline)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|w| !w.is_empty())
}

/// Inputs for one image synthesis prompt.
#[derive(Debug, Clone, Builder)]
pub struct ImagePromptSpec {
    #[builder(into)]
    pub visual_prompt: String,
    #[builder(default)]
    pub style: VisualStyle,
    #[builder(default)]
    pub text_mode: TextMode,
    /// Headline to render in baked mode; emphasis markers are stripped.
    #[builder(into, default)]
    pub headline: String,
    #[builder(into, default)]
    pub sub_headline: String,
    #[builder(into)]
    pub accent_color: Option<String>,
    #[builder(into)]
    pub font_family: Option<String>,
    /// Large-typography poster instead of a scene with integrated text.
    #[builder(default)]
    pub poster: bool,
}

impl ImagePromptSpec {
    /// Prompt inputs for one slide of a project revision.
    ///
    /// Angle batches in baked mode render as typography posters.
    pub fn for_slide(project: &AdProject, slide: &Slide) -> Self {
        Self {
            visual_prompt: slide.visual_prompt.clone(),
            style: project.visual_style,
            text_mode: project.text_mode,
            headline: slide.headline.clone(),
            sub_headline: slide.sub_headline.clone(),
            accent_color: project.user_accent_color.clone(),
            font_family: project.font_family.clone(),
            poster: project.mode == ContentMode::AnglesBatch && project.text_mode == TextMode::Baked,
        }
    }
}

/// Compose the final prompt sent to the image backend.
pub fn compose_image_prompt(spec: &ImagePromptSpec) -> String {
    let preset = spec.style.preset().prompt_prefix;
    match spec.text_mode {
        TextMode::Overlay => format!(
            "Background image. {}. Style: {}. No text.",
            spec.visual_prompt.trim().trim_end_matches('.'),
            preset
        ),
        TextMode::Baked if spec.poster => compose_poster(spec),
        TextMode::Baked => compose_scene(spec, preset),
    }
}

fn accent_description(spec: &ImagePromptSpec) -> String {
    match spec.accent_color.as_deref().filter(|c| !c.trim().is_empty()) {
        Some(color) => format!("Accent Color: {color}"),
        None => "Accent: Gold/Yellow".to_string(),
    }
}

fn highlight_rule(spec: &ImagePromptSpec) -> String {
    emphasis_word(&spec.headline)
        .map(|word| format!("Highlight the word \"{word}\" in the accent color.\n"))
        .unwrap_or_default()
}

fn compose_poster(spec: &ImagePromptSpec) -> String {
    let headline = strip_emphasis(&spec.headline);
    let font = spec
        .font_family
        .as_deref()
        .map(|f| format!("{f}, Impactful, Bold"))
        .unwrap_or_else(|| "Impactful, Bold, Sans-Serif (like Nike ads)".to_string());
    format!(
        "TYPOGRAPHY POSTER DESIGN.\n\
         Subject: A massive text-based advertisement.\n\
         TEXT TO RENDER: \"{headline}\"\n\
         \n\
         RULES:\n\
         1. FONT SIZE: GIGANTIC. The text must occupy 60% of the image.\n\
         2. FONT STYLE: {font}.\n\
         3. LEGIBILITY: Maximum. The background must be clean behind the text.\n\
         4. COLOR: High contrast against background. {accent}.\n\
         5. BACKGROUND: {visual}. Keep it subtle/dark so text pops.\n\
         6. NO SPELLING ERRORS.\n\
         {highlight}",
        accent = accent_description(spec),
        visual = spec.visual_prompt.trim(),
        highlight = highlight_rule(spec),
    )
}

fn compose_scene(spec: &ImagePromptSpec, preset: &str) -> String {
    let headline = strip_emphasis(&spec.headline);
    let font = spec
        .font_family
        .as_deref()
        .map(|f| format!("{f}, Bold, Clean"))
        .unwrap_or_else(|| "Bold, Modern, Clean".to_string());
    let mut prompt = format!(
        "Marketing Image with Text Overlay.\n\
         STYLE: {preset}\n\
         SCENE: {visual}\n\
         \n\
         TEXT INSTRUCTIONS:\n\
         - Render Headline: \"{headline}\"\n\
         - Font: {font}.\n\
         - Position: Center or Top.\n\
         - Color: High Contrast White or {accent}.\n\
         - Legibility: Maximum, text must be sharp and readable.\n\
         - NO SPELLING ERRORS.\n",
        visual = spec.visual_prompt.trim(),
        accent = accent_description(spec),
    );
    let highlight = highlight_rule(spec);
    if !highlight.is_empty() {
        prompt.push_str(&format!("- {highlight}"));
    }
    let sub = strip_emphasis(&spec.sub_headline);
    if !sub.is_empty() {
        prompt.push_str(&format!("\nBottom small text: \"{sub}\"\n"));
    }
    prompt
}

/// JSON schema contract for copy generation.
pub fn copy_response_schema() -> Value {
    let layouts: Vec<String> = Layout::ALL.iter().map(|l| l.to_string()).collect();
    let aligns: Vec<String> = TextAlign::ALL.iter().map(|a| a.to_string()).collect();
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING" },
            "slides": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "headline": { "type": "STRING" },
                        "subHeadline": { "type": "STRING" },
                        "cta": { "type": "STRING" },
                        "visualPrompt": { "type": "STRING" },
                        "layout": { "type": "STRING", "enum": layouts },
                        "textAlign": { "type": "STRING", "enum": aligns },
                        "angleLabel": { "type": "STRING" }
                    },
                    "required": ["headline", "subHeadline", "visualPrompt"]
                }
            }
        },
        "required": ["title", "slides"]
    })
}

/// Build the multimodal copy brief for a request.
pub fn compose_copy_brief(request: &GenerationRequest) -> Vec<ContentPart> {
    let brand = &request.brand;
    let mut instruction = format!(
        "Rol: Director Creativo y Copywriter de Respuesta Directa de élite.\n\
         Especialidad: marketing de impacto y psicología de ventas de alto CTR.\n\
         \n\
         Contexto de la marca:\n\
         - Nombre: {}\n\
         - Nicho/Industria: {}\n\
         - Público objetivo: {}\n\
         - Tono de voz: {}\n\
         \n\
         Intención del contenido: {}\n\
         Misión: generar un copy imposible de ignorar (scroll-stopping).\n\
         \n\
         Tema a tratar: \"{}\"\n",
        brand.name,
        brand.niche,
        brand.target_audience,
        brand.tone,
        request.intent,
        request.brief.trim(),
    );

    instruction.push_str(match request.mode {
        ContentMode::AnglesBatch => {
            "\nTarea: generar 6 variaciones de alto impacto probando diferentes ángulos de marketing.\n\
             Output JSON con 6 items en el array 'slides'.\n\
             Ángulos: Dolor Agudo, Deseo Oculto, Romper Objeción, Lógica/Datos, Urgencia/FOMO, Creativo/Meme.\n\
             Reglas:\n\
             - headline: gancho claro que ataque un ángulo específico; usa *asteriscos* en la palabra clave.\n\
             - subHeadline: breve (1 línea), complementa el gancho.\n\
             - angleLabel: nombre corto del ángulo usado.\n\
             - visualPrompt: imagen de fondo conceptual (SIN TEXTO) para ese ángulo.\n"
        }
        ContentMode::SingleImage => {
            "\nTarea: generar 1 sola imagen publicitaria de altísimo impacto.\n\
             Output JSON con 1 item en el array 'slides'.\n\
             Reglas:\n\
             - headline: gancho poderoso y corto; usa *asteriscos* en la palabra clave.\n\
             - subHeadline: propuesta de valor clara o curiosidad.\n\
             - cta: llamada a la acción breve.\n\
             - visualPrompt: imagen de fondo inusual o de alto contraste.\n"
        }
        ContentMode::Carousel => {
            "\nTarea: crear un carrusel de 6 slides con una narrativa continua.\n\
             Estructura: 1 Gancho, 2 El problema real, 3 Agitación, 4 Cambio de paradigma, \
             5 Evidencia/beneficio, 6 Llamada a la acción.\n\
             Reglas:\n\
             - headline: impactante; usa *asteriscos* en la palabra clave.\n\
             - subHeadline: explicativo y valioso, 2-3 líneas.\n\
             - cta: solo en el último slide.\n\
             - visualPrompt: imágenes consistentes pero variadas.\n"
        }
    });

    if request.text_mode == TextMode::Baked {
        instruction.push_str("\nLos textos se renderizarán dentro de la imagen: headlines de máximo 6 palabras.\n");
    }

    if let Some(kb) = request.knowledge_base.as_deref().filter(|k| !k.trim().is_empty()) {
        let excerpt: String = kb.chars().take(KNOWLEDGE_BASE_LIMIT).collect();
        instruction.push_str(&format!("\nContexto extra: {excerpt}\n"));
    }

    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.reference_image {
        parts.push(ContentPart::Image(image.clone()));
        instruction.push_str("\nUsa el estilo de la imagen adjunta.\n");
    }
    parts.push(ContentPart::Text(instruction));
    parts
}

/// One-shot enhancement prompt for a raw brief.
pub fn compose_enhance_prompt(raw: &str) -> String {
    format!(
        "Rewrite prompt for marketing. Input: \"{}\". Output Spanish. Keep it short. Return ONLY text.",
        raw.trim()
    )
}

/// Direction for a one-line copy rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RewriteTone {
    #[default]
    Shorter,
    Punchier,
    Emotional,
}

pub fn compose_rewrite_prompt(text: &str, tone: RewriteTone) -> String {
    format!(
        "Rewrite: \"{}\" to be {}. Spanish. Return ONLY text.",
        text.trim(),
        tone
    )
}

/// Inputs for regenerating the copy of a single slide.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideCopyContext {
    /// Zero-based slide index.
    pub slide_index: usize,
    pub total_slides: usize,
    pub goal: String,
    pub style: VisualStyle,
    pub intent: ContentIntent,
    pub current_headline: String,
}

impl SlideCopyContext {
    pub fn from_project(project: &AdProject, slide_index: usize) -> crate::error::Result<Self> {
        let slide = project.slide(slide_index)?;
        Ok(Self {
            slide_index,
            total_slides: project.slides.len(),
            goal: project.goal.clone(),
            style: project.visual_style,
            intent: project.intent,
            current_headline: slide.headline.clone(),
        })
    }
}

pub fn compose_regenerate_prompt(context: &SlideCopyContext) -> String {
    format!(
        "Rewrite ad copy. Slide {} of {}. Context: {}. Style: {}. Intent: {}. Old: {}. \
         Output JSON {{headline, subHeadline, cta}}.",
        context.slide_index + 1,
        context.total_slides,
        context.goal.trim(),
        context.style,
        context.intent,
        context.current_headline.trim(),
    )
}

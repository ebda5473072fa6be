//! CLI command handlers.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use super::{CreateArgs, EnhanceArgs, HistoryArgs, HistoryCommands, RewriteArgs, VideoArgs};
use crate::config::AdcraftConfig;
use crate::generation::{VideoOptions, VideoProgress};
use crate::history::{FileHistoryStore, HistoryConfig, HistoryStore};
use crate::orchestrator::Orchestrator;
use crate::types::{BrandContext, GenerationRequest, ImageData};

type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Load the config file if given, else the environment.
pub fn load_config(path: Option<&Path>) -> Result<AdcraftConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let mut config = AdcraftConfig::from_toml_file(path)?;
            if !config.has_credentials() {
                if let Some(key) = AdcraftConfig::from_env().api_key {
                    config = config.with_api_key(key);
                }
            }
            Ok(config)
        }
        None => Ok(AdcraftConfig::from_env()),
    }
}

/// Handle `adcraft create`.
pub async fn handle_create(config: AdcraftConfig, args: CreateArgs) -> CliResult {
    let knowledge_base = match &args.knowledge {
        Some(path) => Some(tokio::fs::read_to_string(path).await?),
        None => None,
    };
    let reference_image = match &args.reference_image {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };
    let brand = BrandContext {
        name: args.brand_name.unwrap_or_default(),
        niche: args.niche.unwrap_or_default(),
        target_audience: args.audience.unwrap_or_default(),
        tone: args.tone.unwrap_or_default(),
    };

    let request = GenerationRequest::builder()
        .brief(args.brief)
        .mode(args.mode)
        .intent(args.intent)
        .style(args.style)
        .aspect_ratio(args.ratio)
        .text_mode(args.text_mode)
        .brand(brand)
        .maybe_knowledge_base(knowledge_base)
        .maybe_reference_image(reference_image)
        .maybe_accent_color(args.accent)
        .maybe_font_family(args.font)
        .build();

    let history_config = HistoryConfig::from_config(HistoryConfig::default_dir(), &config);
    let orchestrator = Orchestrator::from_config(config)?;

    let project = if args.images {
        orchestrator
            .generate_project(&request, &|status| eprintln!("⏳ {status}"))
            .await?
    } else {
        orchestrator.create_project(&request).await?
    };

    println!("📣 {}", project.title);
    for (index, slide) in project.slides.iter().enumerate() {
        println!("\n[{}] {}", index + 1, slide.headline);
        if !slide.sub_headline.is_empty() {
            println!("    {}", slide.sub_headline);
        }
        if let Some(cta) = &slide.cta {
            println!("    → {cta}");
        }
        if let Some(error) = &slide.image_error {
            println!("    ❌ {error}");
        }
    }

    if let Some(dir) = &args.out {
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(dir.join("project.json"), serde_json::to_string_pretty(&project)?).await?;
        for slide in &project.slides {
            if let Some(image) = &slide.background_image {
                let ext = image.mime_type.rsplit('/').next().unwrap_or("png");
                tokio::fs::write(dir.join(format!("{}.{ext}", slide.id)), &image.bytes).await?;
            }
        }
        println!("\n💾 Written to {}", dir.display());
    }

    if args.save {
        let store = FileHistoryStore::new(history_config);
        store.save(&project)?;
        println!("🗂  Saved as {}", project.id);
    }
    Ok(())
}

/// Handle `adcraft enhance`.
pub async fn handle_enhance(config: AdcraftConfig, args: EnhanceArgs) -> CliResult {
    let orchestrator = Orchestrator::from_config(config)?;
    println!("{}", orchestrator.enhance_prompt(&args.text).await?);
    Ok(())
}

/// Handle `adcraft rewrite`.
pub async fn handle_rewrite(config: AdcraftConfig, args: RewriteArgs) -> CliResult {
    let orchestrator = Orchestrator::from_config(config)?;
    println!("{}", orchestrator.magic_rewrite(&args.text, args.tone).await?);
    Ok(())
}

/// Handle `adcraft video`. Ctrl-C cancels the wait.
pub async fn handle_video(config: AdcraftConfig, args: VideoArgs) -> CliResult {
    let seed_image = match &args.image {
        Some(path) => Some(read_image(path).await?),
        None => None,
    };
    let options = VideoOptions {
        prompt: args.prompt,
        seed_image,
        aspect_ratio: args.ratio,
    };
    let orchestrator = Orchestrator::from_config(config)?;

    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let progress = |p: VideoProgress| match p {
        VideoProgress::Processing { poll } => eprintln!("⏳ {} ({poll})", p.message()),
        _ => eprintln!("⏳ {}", p.message()),
    };
    let video = orchestrator.generate_video(&options, &progress, &cancel).await?;
    video.write_to(&args.out).await?;
    println!("🎬 {} bytes written to {}", video.len(), args.out.display());
    Ok(())
}

/// Handle `adcraft history ...`.
pub fn handle_history(config: &AdcraftConfig, args: HistoryArgs) -> CliResult {
    let store = FileHistoryStore::new(HistoryConfig::from_config(HistoryConfig::default_dir(), config));
    match args.command {
        HistoryCommands::List => {
            let projects = store.list()?;
            if projects.is_empty() {
                println!("No saved projects.");
            }
            for project in projects {
                println!(
                    "{}  {}  {} ({}, {} slides)",
                    project.id,
                    project.created_at.format("%Y-%m-%d %H:%M"),
                    project.title,
                    project.mode,
                    project.slides.len()
                );
            }
        }
        HistoryCommands::Show(args) => {
            let project = store
                .list()?
                .into_iter()
                .find(|p| p.id == args.id)
                .ok_or_else(|| format!("No saved project with id '{}'", args.id))?;
            println!("{}", serde_json::to_string_pretty(&project)?);
        }
        HistoryCommands::Delete(args) => {
            let remaining = store.delete(&args.id)?;
            println!("🗑  {} projects left", remaining.len());
        }
    }
    Ok(())
}

async fn read_image(path: &Path) -> Result<ImageData, Box<dyn std::error::Error>> {
    let bytes = tokio::fs::read(path).await?;
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    let mime_type = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "image/png",
    };
    Ok(ImageData::new(bytes, mime_type))
}

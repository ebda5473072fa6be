//! CLI entry point for adcraft.

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::generation::RewriteTone;
use crate::types::{AspectRatio, ContentIntent, ContentMode, TextMode, VisualStyle};

/// adcraft ad-creative CLI
#[derive(Parser, Debug)]
#[command(name = "adcraft", version, about = "Ad copy, images and video from a short brief")]
pub struct Cli {
    /// TOML config file (defaults come from the environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a project (copy, optionally images) from a brief
    Create(CreateArgs),
    /// Rewrite a raw brief into a marketing prompt
    Enhance(EnhanceArgs),
    /// Rewrite one line of copy in a given tone
    Rewrite(RewriteArgs),
    /// Animate a prompt (and optional first frame) into a video
    Video(VideoArgs),
    /// Saved project history
    History(HistoryArgs),
}

/// Arguments for `adcraft create`.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// What the creative is about
    pub brief: String,

    /// single-image, carousel or angles-batch
    #[arg(short, long, default_value = "carousel")]
    pub mode: ContentMode,

    /// paid-ads, organic-value or viral-hook
    #[arg(long, default_value = "paid-ads")]
    pub intent: ContentIntent,

    #[arg(short, long, default_value = "clean")]
    pub style: VisualStyle,

    #[arg(short, long, default_value = "1:1")]
    pub ratio: AspectRatio,

    /// overlay or baked
    #[arg(long, default_value = "overlay")]
    pub text_mode: TextMode,

    #[arg(long)]
    pub brand_name: Option<String>,

    #[arg(long)]
    pub niche: Option<String>,

    #[arg(long)]
    pub audience: Option<String>,

    #[arg(long)]
    pub tone: Option<String>,

    /// Accent color for text rendered into images, e.g. "#ef4444"
    #[arg(long)]
    pub accent: Option<String>,

    /// Font family for text rendered into images
    #[arg(long)]
    pub font: Option<String>,

    /// Text file with extra product knowledge
    #[arg(long)]
    pub knowledge: Option<PathBuf>,

    /// Reference image whose style the copy should follow
    #[arg(long)]
    pub reference_image: Option<PathBuf>,

    /// Also synthesize slide images
    #[arg(long)]
    pub images: bool,

    /// Directory to write project.json and slide images to
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Store the project in history
    #[arg(long)]
    pub save: bool,
}

/// Arguments for `adcraft enhance`.
#[derive(Parser, Debug)]
pub struct EnhanceArgs {
    pub text: String,
}

/// Arguments for `adcraft rewrite`.
#[derive(Parser, Debug)]
pub struct RewriteArgs {
    pub text: String,

    /// shorter, punchier or emotional
    #[arg(short, long, default_value = "punchier")]
    pub tone: RewriteTone,
}

/// Arguments for `adcraft video`.
#[derive(Parser, Debug)]
pub struct VideoArgs {
    pub prompt: String,

    /// First frame
    #[arg(long)]
    pub image: Option<PathBuf>,

    #[arg(short, long, default_value = "16:9")]
    pub ratio: AspectRatio,

    #[arg(short, long, default_value = "adcraft-video.mp4")]
    pub out: PathBuf,
}

/// Arguments for the `history` subcommand group.
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    #[command(subcommand)]
    pub command: HistoryCommands,
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List saved projects, newest first
    List,
    /// Print one saved project as JSON
    Show(HistoryIdArgs),
    /// Delete a saved project
    Delete(HistoryIdArgs),
}

#[derive(Parser, Debug)]
pub struct HistoryIdArgs {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_create_with_defaults() {
        let cli = Cli::try_parse_from(["adcraft", "create", "Curso de yoga"]).unwrap();
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.brief, "Curso de yoga");
                assert_eq!(args.mode, ContentMode::Carousel);
                assert_eq!(args.ratio, AspectRatio::Square);
                assert_eq!(args.text_mode, TextMode::Overlay);
                assert!(!args.images);
                assert!(args.out.is_none());
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn parse_create_with_options() {
        let cli = Cli::try_parse_from([
            "adcraft",
            "--config",
            "adcraft.toml",
            "create",
            "-m",
            "angles-batch",
            "-s",
            "3d-clay",
            "-r",
            "9:16",
            "--text-mode",
            "baked",
            "--images",
            "--accent",
            "#ef4444",
            "Gimnasio",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("adcraft.toml")));
        match cli.command {
            Commands::Create(args) => {
                assert_eq!(args.mode, ContentMode::AnglesBatch);
                assert_eq!(args.style, VisualStyle::Clay3d);
                assert_eq!(args.ratio, AspectRatio::Vertical);
                assert_eq!(args.text_mode, TextMode::Baked);
                assert!(args.images);
                assert_eq!(args.accent.as_deref(), Some("#ef4444"));
                assert!(args.font.is_none());
            }
            other => panic!("expected Create, got {other:?}"),
        }
    }

    #[test]
    fn parse_rewrite_tone() {
        let cli = Cli::try_parse_from(["adcraft", "rewrite", "-t", "emotional", "Hola"]).unwrap();
        match cli.command {
            Commands::Rewrite(args) => assert_eq!(args.tone, RewriteTone::Emotional),
            other => panic!("expected Rewrite, got {other:?}"),
        }
    }

    #[test]
    fn parse_history_delete() {
        let cli = Cli::try_parse_from(["adcraft", "history", "delete", "abc"]).unwrap();
        match cli.command {
            Commands::History(history) => match history.command {
                HistoryCommands::Delete(args) => assert_eq!(args.id, "abc"),
                other => panic!("expected Delete, got {other:?}"),
            },
            other => panic!("expected History, got {other:?}"),
        }
    }

    #[test]
    fn unknown_mode_is_error() {
        assert!(Cli::try_parse_from(["adcraft", "create", "-m", "poster", "x"]).is_err());
    }

    #[test]
    fn parse_missing_subcommand_is_error() {
        assert!(Cli::try_parse_from(["adcraft"]).is_err());
    }
}

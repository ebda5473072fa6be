//! adcraft CLI binary entry point.

use adcraft::cli::commands::{handle_create, handle_enhance, handle_history, handle_rewrite, handle_video, load_config};
use adcraft::cli::{Cli, Commands};
use adcraft::error::AdcraftError;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match load_config(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Create(args) => handle_create(config, args).await,
            Commands::Enhance(args) => handle_enhance(config, args).await,
            Commands::Rewrite(args) => handle_rewrite(config, args).await,
            Commands::Video(args) => handle_video(config, args).await,
            Commands::History(args) => handle_history(&config, args),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        match e.downcast_ref::<AdcraftError>() {
            Some(err) => {
                eprintln!("Error: {}", err.user_message());
                eprintln!("  ({err})");
                if err.requires_new_credential() {
                    eprintln!("  Set GEMINI_API_KEY to a valid key.");
                }
            }
            None => eprintln!("Error: {e}"),
        }
        std::process::exit(1);
    }
}

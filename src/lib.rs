//! adcraft: ad-creative generation over generative AI backends.
//!
//! Turns a short brief into structured ad copy (single image, carousel or
//! a batch of marketing angles), synthesizes one background image per slide
//! and can animate a creative into a short video. Every capability walks an
//! ordered list of models and falls back to the next one on failure, except
//! when the credential itself is rejected.
//!
//! # Quick Start
//!
//! ```no_run
//! use adcraft::prelude::*;
//!
//! # async fn example() -> adcraft::error::Result<()> {
//! let config = AdcraftConfig::from_env();
//! let orchestrator = Orchestrator::from_config(config)?;
//! let request = GenerationRequest::builder()
//!     .brief("Curso online de finanzas personales")
//!     .mode(ContentMode::Carousel)
//!     .build();
//! let project = orchestrator
//!     .generate_project(&request, &|status| println!("{status}"))
//!     .await?;
//! println!("{} ({} slides)", project.title, project.slides.len());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod history;
pub mod models;
pub mod orchestrator;
pub mod prelude;
pub mod provider;
pub mod types;

#[cfg(feature = "cli")]
pub mod cli;

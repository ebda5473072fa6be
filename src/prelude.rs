//! Convenience re-exports for common use.

pub use crate::config::AdcraftConfig;
pub use crate::error::{AdcraftError, FailureSignal, Result};
pub use crate::generation::{ImageBatch, RewriteTone, VideoOptions, VideoProgress};
pub use crate::history::{FileHistoryStore, HistoryStore};
pub use crate::orchestrator::{GenerationStatus, Orchestrator};
pub use crate::provider::GenerativeBackend;
pub use crate::types::{
    AdProject, AspectRatio, BrandContext, ContentIntent, ContentMode, CopyResult, GenerationRequest, ImageData,
    SlidePatch, TextMode, VideoHandle, VisualStyle,
};

//! Copy, image and video generation on top of a [`GenerativeBackend`].
//!
//! [`GenerativeBackend`]: crate::provider::GenerativeBackend

pub mod copy;
pub mod fallback;
pub mod image;
pub mod normalize;
pub mod prompt;
pub mod video;

pub use copy::{enhance_prompt, generate_ad_copy, magic_rewrite, regenerate_slide_copy};
pub use fallback::{FallbackExecutor, FallbackSuccess};
pub use image::{
    apply_batch, edit_image, generate_batch, generate_slide_image, ImageBatch, SlideFailure, SlideImageOutcome,
    IMAGE_ERROR_MARKER,
};
pub use normalize::{decode_copy, extract_json, post_process, DEFAULT_CAROUSEL_CTA, DEFAULT_SINGLE_IMAGE_CTA};
pub use prompt::{compose_image_prompt, ImagePromptSpec, RewriteTone, SlideCopyContext};
pub use video::{generate_video, VideoOptions, VideoProgress};

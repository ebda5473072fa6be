//! Core types for adcraft.

pub mod copy;
pub mod media;
pub mod project;
pub mod request;

pub use copy::*;
pub use media::*;
pub use project::*;
pub use request::*;

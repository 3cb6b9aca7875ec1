// Re-export model types and service functions
pub mod model;
pub mod service;

pub use model::{AcquireError, AcquiredImage, InlineImage, Preview, SourceImage};
pub use service::*;

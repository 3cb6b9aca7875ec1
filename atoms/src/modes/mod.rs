// Re-export model types and service functions
pub mod model;
pub mod service;

pub use model::{EditingMode, HeadshotStyle, ModeDescriptor, RequiredField};
pub use service::*;

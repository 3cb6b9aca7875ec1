pub mod model;

pub use model::{AspectRatio, EnhancementLevel, GenerationSettings, ModeSettings};

pub mod model;
pub mod service;

pub use model::{CropAspect, CropError, CropRegion, CropUnit, CroppedImage, DisplaySize};
pub use service::*;

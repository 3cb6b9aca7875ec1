use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CropUnit {
    /// Percent of the displayed image (0-100).
    Percent,
    /// Pixels of the displayed image element, not of the native image.
    Pixels,
}

/// Crop rectangle in displayed coordinates.
///
/// Pure domain model: the UI reports it, the crop transform consumes it once.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub unit: CropUnit,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropRegion {
    pub fn new(unit: CropUnit, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            unit,
            x,
            y,
            width,
            height,
        }
    }

    pub fn pixels(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(CropUnit::Pixels, x, y, width, height)
    }

    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Same rectangle in displayed pixels.
    pub fn to_pixels(&self, displayed: DisplaySize) -> CropRegion {
        match self.unit {
            CropUnit::Pixels => *self,
            CropUnit::Percent => CropRegion::pixels(
                self.x / 100.0 * displayed.width,
                self.y / 100.0 * displayed.height,
                self.width / 100.0 * displayed.width,
                self.height / 100.0 * displayed.height,
            ),
        }
    }
}

/// Laid-out size of the image element the user drags the selection on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Aspect lock offered by the crop tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropAspect {
    Free,
    #[default]
    Square,
    Classic,
    Wide,
}

impl CropAspect {
    pub const ALL: [CropAspect; 4] = [
        CropAspect::Free,
        CropAspect::Square,
        CropAspect::Classic,
        CropAspect::Wide,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CropAspect::Free => "Bebas",
            CropAspect::Square => "1:1",
            CropAspect::Classic => "4:3",
            CropAspect::Wide => "16:9",
        }
    }

    /// width / height, `None` when unconstrained.
    pub fn ratio(&self) -> Option<f64> {
        match self {
            CropAspect::Free => None,
            CropAspect::Square => Some(1.0),
            CropAspect::Classic => Some(4.0 / 3.0),
            CropAspect::Wide => Some(16.0 / 9.0),
        }
    }
}

/// PNG output of a crop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CroppedImage {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum CropError {
    #[error("area pangkas tidak valid")]
    InvalidCropRegion,
    #[error("gambar tidak dapat dibaca: {0}")]
    Decode(String),
    #[error("gambar tidak dapat dienkode: {0}")]
    Encode(String),
}

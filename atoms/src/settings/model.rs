use crate::crop::model::{CropAspect, CropRegion};
use crate::error::ValidationError;
use crate::modes::model::EditingMode;
use serde::{Deserialize, Serialize};
use std::fmt;

// ========== WIRE SETTINGS ==========
/// Settings as the browser posts them. Only the fields relevant to `menuKey`
/// are read; the rest are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enhancement_level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headshot_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_images: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_aspect_ratio: Option<String>,
}

// ========== ASPECT RATIO ==========
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "3:4")]
    Vertical,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 5] = [
        AspectRatio::Square,
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::Vertical,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Classic => "4:3",
            AspectRatio::Vertical => "3:4",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AspectRatio::Square => "Persegi (1:1)",
            AspectRatio::Landscape => "Lanskap (16:9)",
            AspectRatio::Portrait => "Potret (9:16)",
            AspectRatio::Classic => "Klasik (4:3)",
            AspectRatio::Vertical => "Vertikal (3:4)",
        }
    }

    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == value.trim())
            .ok_or_else(|| ValidationError::new("Rasio aspek tidak didukung."))
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========== ENHANCEMENT LEVEL ==========
/// Enhancement intensity, 1 (lightest) to 4 (strongest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct EnhancementLevel(u8);

impl EnhancementLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 4;

    pub fn new(level: u32) -> Result<Self, ValidationError> {
        match u8::try_from(level) {
            Ok(l) if (Self::MIN..=Self::MAX).contains(&l) => Ok(Self(l)),
            _ => Err(ValidationError::new(
                "Tingkat peningkatan harus antara 1 dan 4.",
            )),
        }
    }

    pub fn get(&self) -> u8 {
        self.0
    }

    pub fn phrase(&self) -> &'static str {
        match self.0 {
            1 => "Slightly improve",
            2 => "Improve",
            3 => "Significantly improve",
            _ => "Dramatically improve and upscale",
        }
    }

    pub fn label(&self) -> &'static str {
        match self.0 {
            1 => "Rendah",
            2 => "Sedang",
            3 => "Tinggi",
            _ => "Ultra",
        }
    }
}

impl Default for EnhancementLevel {
    fn default() -> Self {
        Self(2)
    }
}

// ========== MODE SETTINGS ==========
pub const MIN_IMAGE_COUNT: u8 = 1;
pub const MAX_IMAGE_COUNT: u8 = 4;

/// Per-mode editor settings. Each variant carries only what its mode uses, and a
/// fresh value is built whenever the mode changes.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeSettings {
    TextToImage {
        prompt: String,
        count: u8,
        aspect_ratio: AspectRatio,
    },
    Headshot {
        /// Style id from the headshot catalogue.
        style: Option<String>,
    },
    RemoveObject {
        description: String,
    },
    EnhanceQuality {
        level: EnhancementLevel,
    },
    ChangeStyle {
        description: String,
    },
    Crop {
        aspect: CropAspect,
        selection: Option<CropRegion>,
    },
}

impl ModeSettings {
    pub fn for_mode(mode: EditingMode) -> Self {
        match mode {
            EditingMode::TextToImage => ModeSettings::TextToImage {
                prompt: String::new(),
                count: MIN_IMAGE_COUNT,
                aspect_ratio: AspectRatio::default(),
            },
            EditingMode::Headshot => ModeSettings::Headshot { style: None },
            EditingMode::RemoveObject => ModeSettings::RemoveObject {
                description: String::new(),
            },
            EditingMode::EnhanceQuality => ModeSettings::EnhanceQuality {
                level: EnhancementLevel::default(),
            },
            EditingMode::ChangeStyle => ModeSettings::ChangeStyle {
                description: String::new(),
            },
            EditingMode::Crop => ModeSettings::Crop {
                aspect: CropAspect::default(),
                selection: None,
            },
        }
    }

    pub fn mode(&self) -> EditingMode {
        match self {
            ModeSettings::TextToImage { .. } => EditingMode::TextToImage,
            ModeSettings::Headshot { .. } => EditingMode::Headshot,
            ModeSettings::RemoveObject { .. } => EditingMode::RemoveObject,
            ModeSettings::EnhanceQuality { .. } => EditingMode::EnhanceQuality,
            ModeSettings::ChangeStyle { .. } => EditingMode::ChangeStyle,
            ModeSettings::Crop { .. } => EditingMode::Crop,
        }
    }

    /// Free text of the prompt-driven modes.
    pub fn prompt(&self) -> Option<&str> {
        match self {
            ModeSettings::TextToImage { prompt, .. } => Some(prompt.as_str()),
            ModeSettings::RemoveObject { description } | ModeSettings::ChangeStyle { description } => {
                Some(description.as_str())
            }
            _ => None,
        }
    }

    pub fn headshot_style(&self) -> Option<&str> {
        match self {
            ModeSettings::Headshot { style } => style.as_deref().filter(|s| !s.is_empty()),
            _ => None,
        }
    }

    pub fn crop_selection(&self) -> Option<&CropRegion> {
        match self {
            ModeSettings::Crop { selection, .. } => selection.as_ref(),
            _ => None,
        }
    }

    /// Setters return `false` when the active mode has no such field.
    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        match self {
            ModeSettings::TextToImage { prompt, .. } => *prompt = text.into(),
            ModeSettings::RemoveObject { description } | ModeSettings::ChangeStyle { description } => {
                *description = text.into()
            }
            _ => return false,
        }
        true
    }

    pub fn set_image_count(&mut self, value: u32) -> bool {
        match self {
            ModeSettings::TextToImage { count, .. } => {
                *count = clamp_image_count(value);
                true
            }
            _ => false,
        }
    }

    pub fn set_aspect_ratio(&mut self, value: AspectRatio) -> bool {
        match self {
            ModeSettings::TextToImage { aspect_ratio, .. } => {
                *aspect_ratio = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_headshot_style(&mut self, id: impl Into<String>) -> bool {
        match self {
            ModeSettings::Headshot { style } => {
                *style = Some(id.into());
                true
            }
            _ => false,
        }
    }

    pub fn set_enhancement_level(&mut self, value: EnhancementLevel) -> bool {
        match self {
            ModeSettings::EnhanceQuality { level } => {
                *level = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_crop_aspect(&mut self, value: CropAspect) -> bool {
        match self {
            ModeSettings::Crop { aspect, .. } => {
                *aspect = value;
                true
            }
            _ => false,
        }
    }

    pub fn set_crop_selection(&mut self, region: CropRegion) -> bool {
        match self {
            ModeSettings::Crop { selection, .. } => {
                *selection = Some(region);
                true
            }
            _ => false,
        }
    }

    /// Wire settings for the relay. Crop has nothing to send.
    pub fn to_wire(&self) -> GenerationSettings {
        match self {
            ModeSettings::TextToImage {
                prompt,
                count,
                aspect_ratio,
            } => GenerationSettings {
                prompt: Some(prompt.clone()),
                number_of_images: Some(u32::from(*count)),
                image_aspect_ratio: Some(aspect_ratio.as_str().to_string()),
                ..Default::default()
            },
            ModeSettings::Headshot { style } => GenerationSettings {
                headshot_style: style.clone(),
                ..Default::default()
            },
            ModeSettings::RemoveObject { description } | ModeSettings::ChangeStyle { description } => {
                GenerationSettings {
                    prompt: Some(description.clone()),
                    ..Default::default()
                }
            }
            ModeSettings::EnhanceQuality { level } => GenerationSettings {
                enhancement_level: Some(u32::from(level.get())),
                ..Default::default()
            },
            ModeSettings::Crop { .. } => GenerationSettings::default(),
        }
    }
}

pub fn clamp_image_count(value: u32) -> u8 {
    value.clamp(u32::from(MIN_IMAGE_COUNT), u32::from(MAX_IMAGE_COUNT)) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_per_mode() {
        assert_eq!(
            ModeSettings::for_mode(EditingMode::TextToImage),
            ModeSettings::TextToImage {
                prompt: String::new(),
                count: 1,
                aspect_ratio: AspectRatio::Square
            }
        );
        assert_eq!(
            ModeSettings::for_mode(EditingMode::EnhanceQuality),
            ModeSettings::EnhanceQuality { level: EnhancementLevel::default() }
        );
        assert_eq!(EnhancementLevel::default().get(), 2);
        for mode in EditingMode::ALL {
            assert_eq!(ModeSettings::for_mode(mode).mode(), mode);
        }
    }

    #[test]
    fn setters_only_touch_their_own_mode() {
        let mut settings = ModeSettings::for_mode(EditingMode::EnhanceQuality);
        assert!(!settings.set_prompt("ignored"));
        assert!(!settings.set_headshot_style("studio-gray"));
        assert_eq!(settings.prompt(), None);

        let mut headshot = ModeSettings::for_mode(EditingMode::Headshot);
        assert_eq!(headshot.headshot_style(), None);
        assert!(headshot.set_headshot_style(""));
        assert_eq!(headshot.headshot_style(), None);
        assert!(headshot.set_headshot_style("studio-gray"));
        assert_eq!(headshot.headshot_style(), Some("studio-gray"));
    }

    #[test]
    fn image_count_is_clamped() {
        let mut settings = ModeSettings::for_mode(EditingMode::TextToImage);
        settings.set_image_count(0);
        assert!(matches!(settings, ModeSettings::TextToImage { count: 1, .. }));
        settings.set_image_count(9);
        assert!(matches!(settings, ModeSettings::TextToImage { count: 4, .. }));
    }

    #[test]
    fn enhancement_level_bounds_and_phrases() {
        assert!(EnhancementLevel::new(0).is_err());
        assert!(EnhancementLevel::new(5).is_err());
        assert_eq!(EnhancementLevel::new(1).unwrap().phrase(), "Slightly improve");
        assert_eq!(EnhancementLevel::new(4).unwrap().phrase(), "Dramatically improve and upscale");
    }

    #[test]
    fn aspect_ratio_parses_wire_values() {
        assert_eq!(AspectRatio::parse("16:9").unwrap(), AspectRatio::Landscape);
        assert!(AspectRatio::parse("2:1").is_err());
        assert_eq!(serde_json::to_string(&AspectRatio::Portrait).unwrap(), "\"9:16\"");
    }

    #[test]
    fn wire_settings_carry_only_relevant_fields() {
        let mut settings = ModeSettings::for_mode(EditingMode::TextToImage);
        settings.set_prompt("a lighthouse");
        settings.set_image_count(3);
        let json = serde_json::to_value(settings.to_wire()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "prompt": "a lighthouse",
                "numberOfImages": 3,
                "imageAspectRatio": "1:1"
            })
        );

        let enhance = ModeSettings::for_mode(EditingMode::EnhanceQuality);
        let json = serde_json::to_value(enhance.to_wire()).unwrap();
        assert_eq!(json, serde_json::json!({ "enhancementLevel": 2 }));
    }

    #[test]
    fn wire_settings_tolerate_missing_fields() {
        let parsed: GenerationSettings = serde_json::from_str(r#"{"prompt":"x"}"#).unwrap();
        assert_eq!(parsed.prompt.as_deref(), Some("x"));
        assert_eq!(parsed.enhancement_level, None);
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of editing operations the user can pick from the menu.
///
/// Wire names match the menu keys the browser sends as `menuKey`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditingMode {
    #[serde(rename = "generate-image")]
    TextToImage,
    Headshot,
    RemoveObject,
    EnhanceQuality,
    ChangeStyle,
    Crop,
}

impl EditingMode {
    pub const ALL: [EditingMode; 6] = [
        EditingMode::TextToImage,
        EditingMode::Headshot,
        EditingMode::RemoveObject,
        EditingMode::Crop,
        EditingMode::EnhanceQuality,
        EditingMode::ChangeStyle,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EditingMode::TextToImage => "generate-image",
            EditingMode::Headshot => "headshot",
            EditingMode::RemoveObject => "remove-object",
            EditingMode::EnhanceQuality => "enhance-quality",
            EditingMode::ChangeStyle => "change-style",
            EditingMode::Crop => "crop",
        }
    }
}

impl fmt::Display for EditingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// An input a mode needs before it can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// Free-text prompt or description, non-empty after trimming.
    Prompt,
    /// An uploaded source image.
    SourceImage,
    /// A selected headshot style.
    HeadshotStyle,
    /// A crop selection with nonzero width and height.
    CropRegion,
}

/// Registry entry for one mode.
#[derive(Debug, Clone, Copy)]
pub struct ModeDescriptor {
    pub mode: EditingMode,
    pub label: &'static str,
    pub description: &'static str,
    /// Checked in order; the first failing field decides the message.
    pub required: &'static [RequiredField],
    /// Crop is handled on the client and never reaches the relay.
    pub remote: bool,
}

impl ModeDescriptor {
    pub fn requires_image(&self) -> bool {
        self.required.contains(&RequiredField::SourceImage)
    }
}

// ========== HEADSHOT STYLES ==========
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadshotStyle {
    pub id: &'static str,
    pub name: &'static str,
    /// Style description embedded in the headshot instruction.
    pub prompt: &'static str,
}

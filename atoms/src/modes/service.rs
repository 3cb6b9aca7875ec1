use super::model::{EditingMode, HeadshotStyle, ModeDescriptor, RequiredField};
use crate::error::ValidationError;
use crate::media::model::SourceImage;
use crate::settings::model::ModeSettings;

/// Menu order as shown in the sidebar.
pub const MENU: [ModeDescriptor; 6] = [
    ModeDescriptor {
        mode: EditingMode::TextToImage,
        label: "Buat Gambar",
        description: "Buat gambar baru dari teks",
        required: &[RequiredField::Prompt],
        remote: true,
    },
    ModeDescriptor {
        mode: EditingMode::Headshot,
        label: "Headshot",
        description: "Buat foto headshot profesional",
        required: &[RequiredField::SourceImage, RequiredField::HeadshotStyle],
        remote: true,
    },
    ModeDescriptor {
        mode: EditingMode::RemoveObject,
        label: "Hapus Objek",
        description: "Hilangkan objek yang tidak diinginkan",
        required: &[RequiredField::SourceImage, RequiredField::Prompt],
        remote: true,
    },
    ModeDescriptor {
        mode: EditingMode::Crop,
        label: "Pangkas Gambar",
        description: "Potong dan sesuaikan ukuran gambar",
        required: &[RequiredField::SourceImage, RequiredField::CropRegion],
        remote: false,
    },
    ModeDescriptor {
        mode: EditingMode::EnhanceQuality,
        label: "Tingkatkan Kualitas",
        description: "Perbaiki resolusi dan detail foto",
        required: &[RequiredField::SourceImage],
        remote: true,
    },
    ModeDescriptor {
        mode: EditingMode::ChangeStyle,
        label: "Ganti Gaya",
        description: "Ubah gaya foto menjadi artistik",
        required: &[RequiredField::SourceImage, RequiredField::Prompt],
        remote: true,
    },
];

pub const HEADSHOT_STYLES: [HeadshotStyle; 6] = [
    HeadshotStyle {
        id: "corporate-blue",
        name: "Corporate Blue",
        prompt: "professional corporate headshot, with the person wearing a business suit, against a blurred office background with blue tones",
    },
    HeadshotStyle {
        id: "studio-gray",
        name: "Studio Gray",
        prompt: "professional studio headshot with dramatic lighting, against a solid dark gray background",
    },
    HeadshotStyle {
        id: "outdoor-natural",
        name: "Outdoor",
        prompt: "professional outdoor headshot with natural lighting, against a blurred park or nature background",
    },
    HeadshotStyle {
        id: "casual-cafe",
        name: "Casual Cafe",
        prompt: "casual and friendly headshot, with the person in smart-casual attire, inside a modern cafe with warm lighting",
    },
    HeadshotStyle {
        id: "black-and-white",
        name: "B&W Classic",
        prompt: "classic black and white portrait headshot, with strong contrast and a timeless feel",
    },
    HeadshotStyle {
        id: "vibrant-color",
        name: "Vibrant Color",
        prompt: "vibrant and colorful headshot, with the person against a brightly colored wall (e.g., yellow or teal), creative and energetic feel",
    },
];

pub const MISSING_IMAGE_PROMPT: &str = "Silakan masukkan deskripsi gambar.";
pub const MISSING_SOURCE_IMAGE: &str = "Silakan unggah gambar terlebih dahulu.";
pub const MISSING_CROP_REGION: &str = "Silakan pilih area untuk dipangkas.";
pub const MISSING_HEADSHOT_STYLE: &str = "Silakan pilih gaya headshot.";
pub const MISSING_DESCRIPTION: &str = "Silakan isi deskripsi yang diperlukan.";

/// Registry lookup. Every mode has exactly one entry in `MENU`.
pub fn descriptor(mode: EditingMode) -> &'static ModeDescriptor {
    let index = match mode {
        EditingMode::TextToImage => 0,
        EditingMode::Headshot => 1,
        EditingMode::RemoveObject => 2,
        EditingMode::Crop => 3,
        EditingMode::EnhanceQuality => 4,
        EditingMode::ChangeStyle => 5,
    };
    &MENU[index]
}

pub fn find_headshot_style(id: &str) -> Option<&'static HeadshotStyle> {
    HEADSHOT_STYLES.iter().find(|s| s.id == id)
}

fn missing_message(mode: EditingMode, field: RequiredField) -> &'static str {
    match field {
        RequiredField::Prompt if mode == EditingMode::TextToImage => MISSING_IMAGE_PROMPT,
        RequiredField::Prompt => MISSING_DESCRIPTION,
        RequiredField::SourceImage => MISSING_SOURCE_IMAGE,
        RequiredField::HeadshotStyle => MISSING_HEADSHOT_STYLE,
        RequiredField::CropRegion => MISSING_CROP_REGION,
    }
}

fn is_satisfied(field: RequiredField, settings: &ModeSettings, image: Option<&SourceImage>) -> bool {
    match field {
        RequiredField::Prompt => settings
            .prompt()
            .map(|p| !p.trim().is_empty())
            .unwrap_or(false),
        RequiredField::SourceImage => image.is_some(),
        RequiredField::HeadshotStyle => settings.headshot_style().is_some(),
        RequiredField::CropRegion => settings
            .crop_selection()
            .map(|r| r.has_area())
            .unwrap_or(false),
    }
}

/// Client-side submission check: walks the mode's required fields in order and
/// fails on the first one that is missing.
pub fn validate_submission(
    settings: &ModeSettings,
    image: Option<&SourceImage>,
) -> Result<(), ValidationError> {
    let entry = descriptor(settings.mode());
    for field in entry.required {
        if !is_satisfied(*field, settings, image) {
            return Err(ValidationError::new(missing_message(entry.mode, *field)));
        }
    }
    Ok(())
}

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Uploaded image payload. Replaced wholesale on re-upload, never edited in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl SourceImage {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    pub fn to_inline(&self) -> InlineImage {
        InlineImage {
            data: BASE64.encode(&self.bytes),
            mime_type: self.mime_type.clone(),
        }
    }
}

/// Wire form of an image: `{ "data": <base64>, "mimeType": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineImage {
    pub data: String,
    pub mime_type: String,
}

/// What the upload box shows after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub width: u32,
    pub height: u32,
    pub data_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredImage {
    pub source: SourceImage,
    pub preview: Preview,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AcquireError {
    #[error("Ukuran file tidak boleh melebihi 10MB.")]
    FileTooLarge { size: usize },
    #[error("Format file tidak didukung. Gunakan PNG, JPG, atau GIF.")]
    UnsupportedType { mime_type: String },
    #[error("Gambar tidak dapat dibaca: {0}")]
    Unreadable(String),
}

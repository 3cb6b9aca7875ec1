use crate::error::ValidationError;
use crate::media::model::InlineImage;
use crate::modes::model::EditingMode;
use crate::settings::model::{AspectRatio, GenerationSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ========== RELAY WIRE ==========
/// Body of `POST /api/generate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequestBody {
    pub image: Option<InlineImage>,
    #[serde(default)]
    pub settings: GenerationSettings,
    pub menu_key: EditingMode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponseBody {
    pub images: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ========== PROVIDER REQUESTS ==========
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextToImageRequest {
    pub prompt: String,
    /// 1..=4
    pub count: u8,
    pub aspect_ratio: AspectRatio,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformRequest {
    pub image: InlineImage,
    pub instruction: String,
}

/// The one outbound call a submission turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationRequest {
    TextToImage(TextToImageRequest),
    Transform(TransformRequest),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Non-success status or a body we could not make sense of.
    #[error("{0}")]
    Provider(String),
    /// The call itself failed (DNS, connect, TLS, timeout).
    #[error("{0}")]
    Transport(String),
    #[error("Tidak ada gambar yang dihasilkan. Respons API tidak valid.")]
    EmptyResult,
}

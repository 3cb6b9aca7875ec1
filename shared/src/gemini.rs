use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use ubah_atoms::generation::{GenerateError, ImageProvider, TextToImageRequest, TransformRequest};
use ubah_atoms::media::InlineImage;

use crate::config::RelayConfig;

// ========== IMAGEN (predict) ==========
#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<PredictInstance<'a>>,
    parameters: PredictParameters<'a>,
}

#[derive(Debug, Serialize)]
struct PredictInstance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters<'a> {
    sample_count: u8,
    aspect_ratio: &'a str,
    output_mime_type: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
}

// ========== GEMINI (generateContent) ==========
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

/// Untagged union of inline media and text parts.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart<'a> {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: &'a InlineImage,
    },
    Text {
        text: &'a str,
    },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    #[serde(default, alias = "inline_data")]
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
struct ResponseInlineData {
    #[serde(default)]
    data: String,
}

// ========== ERRORS ==========
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini API client for both image call shapes.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    imagen_model: String,
    edit_model: String,
}

impl GeminiProvider {
    pub fn new(http: reqwest::Client, config: &RelayConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            api_base: config.api_base.clone(),
            imagen_model: config.imagen_model.clone(),
            edit_model: config.edit_model.clone(),
        }
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        let model = model.trim().trim_start_matches("models/");
        format!("{}/models/{}:{}", self.api_base, model, method)
    }

    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R, GenerateError>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(payload)
            .send()
            .await
            .map_err(|e| GenerateError::Transport(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GenerateError::Transport(format!("Gemini response read failed: {}", e)))?;

        if !status.is_success() {
            tracing::error!("❌ Gemini returned {}: {}", status, truncate(&text, 500));
            return Err(GenerateError::Provider(provider_error_message(status.as_u16(), &text)));
        }

        serde_json::from_str(&text)
            .map_err(|e| GenerateError::Provider(format!("Respons API tidak valid: {}", e)))
    }
}

impl ImageProvider for GeminiProvider {
    async fn generate_images(
        &self,
        request: &TextToImageRequest,
    ) -> Result<Vec<String>, GenerateError> {
        let endpoint = self.endpoint(&self.imagen_model, "predict");
        let payload = predict_payload(request);
        tracing::info!(
            "🎨 Imagen predict: model={}, count={}, aspect={}",
            self.imagen_model,
            request.count,
            request.aspect_ratio
        );

        let response: PredictResponse = self.post_json(&endpoint, &payload).await?;
        Ok(images_from_predictions(response))
    }

    async fn transform_image(
        &self,
        request: &TransformRequest,
    ) -> Result<Vec<String>, GenerateError> {
        let endpoint = self.endpoint(&self.edit_model, "generateContent");
        let payload = generate_content_payload(request);
        tracing::info!(
            "🖌️ Gemini generateContent: model={}, mime={}, image_b64_len={}",
            self.edit_model,
            request.image.mime_type,
            request.image.data.len()
        );

        let response: GenerateContentResponse = self.post_json(&endpoint, &payload).await?;
        Ok(image_from_candidates(response).into_iter().collect())
    }
}

fn predict_payload(request: &TextToImageRequest) -> PredictRequest<'_> {
    PredictRequest {
        instances: vec![PredictInstance {
            prompt: &request.prompt,
        }],
        parameters: PredictParameters {
            sample_count: request.count,
            aspect_ratio: request.aspect_ratio.as_str(),
            output_mime_type: "image/png",
        },
    }
}

fn generate_content_payload(request: &TransformRequest) -> GenerateContentRequest<'_> {
    GenerateContentRequest {
        contents: vec![RequestContent {
            role: "user",
            parts: vec![
                RequestPart::InlineData {
                    inline_data: &request.image,
                },
                RequestPart::Text {
                    text: &request.instruction,
                },
            ],
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["IMAGE"],
        },
    }
}

/// Predictions without image bytes (e.g. safety-filtered) are skipped.
fn images_from_predictions(response: PredictResponse) -> Vec<String> {
    response
        .predictions
        .into_iter()
        .filter_map(|p| p.bytes_base64_encoded)
        .filter(|data| !data.is_empty())
        .collect()
}

/// First inline image of the first candidate; text parts are ignored.
fn image_from_candidates(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .filter_map(|part| part.inline_data)
        .map(|inline| inline.data)
        .find(|data| !data.is_empty())
}

fn provider_error_message(status: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(kind) => format!("status {} ({}): {}", status, kind, envelope.error.message),
            None => format!("status {}: {}", status, envelope.error.message),
        },
        Err(_) if body.trim().is_empty() => format!("status {}", status),
        Err(_) => format!("status {}: {}", status, truncate(body.trim(), 200)),
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

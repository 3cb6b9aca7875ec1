use super::model::{GenerateError, GenerationRequest, TextToImageRequest, TransformRequest};
use super::provider::ImageProvider;
use crate::error::ValidationError;
use crate::media::model::InlineImage;
use crate::modes::model::EditingMode;
use crate::modes::service::find_headshot_style;
use crate::settings::model::{clamp_image_count, AspectRatio, EnhancementLevel, GenerationSettings};

pub const MISSING_PROMPT: &str = "Silakan masukkan prompt untuk membuat gambar.";
pub const MISSING_UPLOAD: &str = "Silakan unggah gambar terlebih dahulu untuk mode ini.";
pub const MISSING_STYLE: &str = "Silakan pilih gaya headshot.";
pub const CROP_IS_LOCAL: &str = "Mode pangkas diproses di perangkat, bukan di server.";

/// Turn a submission into the single outbound provider request.
///
/// Pure: validation failures are returned before anything touches the network.
/// Only the settings fields relevant to `mode` are read.
pub fn build_request(
    mode: EditingMode,
    settings: &GenerationSettings,
    image: Option<InlineImage>,
) -> Result<GenerationRequest, ValidationError> {
    match mode {
        EditingMode::TextToImage => text_to_image(settings).map(GenerationRequest::TextToImage),
        EditingMode::Crop => Err(ValidationError::new(CROP_IS_LOCAL)),
        EditingMode::Headshot => {
            let image = require_image(image)?;
            let style = settings
                .headshot_style
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ValidationError::new(MISSING_STYLE))?;
            Ok(transform(image, headshot_instruction(style)))
        }
        EditingMode::RemoveObject => {
            // An empty description still goes out; only the editor requires it.
            let image = require_image(image)?;
            Ok(transform(image, remove_object_instruction(prompt_of(settings))))
        }
        EditingMode::EnhanceQuality => {
            let image = require_image(image)?;
            // 0 reads as unset, like a missing field.
            let level = match settings.enhancement_level {
                None | Some(0) => EnhancementLevel::default(),
                Some(level) => EnhancementLevel::new(level)?,
            };
            Ok(transform(image, enhance_instruction(level)))
        }
        EditingMode::ChangeStyle => {
            let image = require_image(image)?;
            Ok(transform(image, change_style_instruction(prompt_of(settings))))
        }
    }
}

fn text_to_image(settings: &GenerationSettings) -> Result<TextToImageRequest, ValidationError> {
    let prompt = prompt_of(settings).trim();
    if prompt.is_empty() {
        return Err(ValidationError::new(MISSING_PROMPT));
    }

    let aspect_ratio = match settings.image_aspect_ratio.as_deref().map(str::trim) {
        None | Some("") => AspectRatio::default(),
        Some(value) => AspectRatio::parse(value)?,
    };

    Ok(TextToImageRequest {
        prompt: prompt.to_string(),
        count: clamp_image_count(settings.number_of_images.unwrap_or(1)),
        aspect_ratio,
    })
}

fn require_image(image: Option<InlineImage>) -> Result<InlineImage, ValidationError> {
    image.ok_or_else(|| ValidationError::new(MISSING_UPLOAD))
}

fn prompt_of(settings: &GenerationSettings) -> &str {
    settings.prompt.as_deref().unwrap_or("")
}

fn transform(image: InlineImage, instruction: String) -> GenerationRequest {
    GenerationRequest::Transform(TransformRequest { image, instruction })
}

/// `style` is a catalogue id or, failing that, a free-form style description.
pub fn headshot_instruction(style: &str) -> String {
    let description = find_headshot_style(style).map(|s| s.prompt).unwrap_or(style);
    format!(
        "Generate a professional headshot of the person in this photo. The style should be: {}. \
         Preserve the person's facial features and likeness accurately. \
         The final image should be a high-quality portrait.",
        description
    )
}

pub fn remove_object_instruction(target: &str) -> String {
    format!(
        "Remove this from the image: {}. Fill in the empty space realistically as if the object was never there.",
        target
    )
}

pub fn enhance_instruction(level: EnhancementLevel) -> String {
    format!(
        "{} the quality, sharpness, and detail of this image. Fix any compression artifacts or blurriness.",
        level.phrase()
    )
}

pub fn change_style_instruction(style: &str) -> String {
    format!("Recreate this image in the style of: {}.", style)
}

/// Send one request, await one response. No retry.
pub async fn dispatch<P: ImageProvider + Sync>(
    provider: &P,
    request: &GenerationRequest,
) -> Result<Vec<String>, GenerateError> {
    let images = match request {
        GenerationRequest::TextToImage(req) => provider.generate_images(req).await?,
        GenerationRequest::Transform(req) => provider.transform_image(req).await?,
    };

    if images.is_empty() {
        return Err(GenerateError::EmptyResult);
    }
    Ok(images)
}

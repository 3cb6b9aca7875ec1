use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use ubah_atoms::crop::{self, CropAspect, CropRegion, DisplaySize};
use ubah_atoms::generation::GenerateRequestBody;
use ubah_atoms::media::{self, AcquireError, AcquiredImage};
use ubah_atoms::modes::{self, descriptor};
use ubah_atoms::settings::{AspectRatio, EnhancementLevel, ModeSettings};
use ubah_atoms::{EditingMode, ValidationError};

use crate::presentation::{
    download_file, result_view, DisplayState, DownloadError, DownloadFile, ResultView, ZoomState,
};
use crate::transport::{GenerateTransport, TransportError};

pub const GENERATION_FAILED_PREFIX: &str = "Gagal menghasilkan gambar: ";
pub const CROP_FAILED_PREFIX: &str = "Gagal memangkas gambar: ";

/// A remote submission waiting for its relay response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSubmission {
    pub token: u64,
    pub body: GenerateRequestBody,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Handled on the device; the result is already displayed.
    Cropped,
    Dispatch(PendingSubmission),
}

/// One user's editor: active mode, its settings, the uploaded image and the
/// result panel.
///
/// Each remote submission takes a fresh token. Only the newest token may
/// complete; anything older is dropped when it arrives.
#[derive(Debug, Clone)]
pub struct Studio {
    settings: ModeSettings,
    image: Option<AcquiredImage>,
    displayed: Option<DisplaySize>,
    validation_error: Option<String>,
    display: DisplayState,
    zoom: ZoomState,
    latest_token: u64,
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

impl Studio {
    pub fn new() -> Self {
        Self {
            settings: ModeSettings::for_mode(EditingMode::TextToImage),
            image: None,
            displayed: None,
            validation_error: None,
            display: DisplayState::Empty,
            zoom: ZoomState::default(),
            latest_token: 0,
        }
    }

    // ========== ACCESSORS ==========
    pub fn mode(&self) -> EditingMode {
        self.settings.mode()
    }

    pub fn settings(&self) -> &ModeSettings {
        &self.settings
    }

    pub fn image(&self) -> Option<&AcquiredImage> {
        self.image.as_ref()
    }

    pub fn validation_error(&self) -> Option<&str> {
        self.validation_error.as_deref()
    }

    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    pub fn is_loading(&self) -> bool {
        self.display == DisplayState::Loading
    }

    pub fn view(&self) -> ResultView<'_> {
        result_view(&self.display)
    }

    pub fn zoomed(&self) -> Option<usize> {
        self.zoom.zoomed()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_loading() {
            "Memproses..."
        } else if self.mode() == EditingMode::Crop {
            "Pangkas Gambar"
        } else {
            "Hasilkan Gambar"
        }
    }

    // ========== MODE & INPUTS ==========
    /// Switch tools. Settings, upload, messages and results all start over, and
    /// any response still in flight is dropped when it lands.
    pub fn select_mode(&mut self, mode: EditingMode) {
        tracing::debug!("🧭 select mode {} ({})", mode, descriptor(mode).label);
        self.settings = ModeSettings::for_mode(mode);
        self.image = None;
        self.displayed = None;
        self.validation_error = None;
        self.display = DisplayState::Empty;
        self.zoom.clear();
        self.latest_token += 1;
    }

    /// Replace the uploaded image. On failure the previous upload is kept and the
    /// reason is shown inline.
    pub fn upload(&mut self, bytes: Vec<u8>, mime_type: &str) -> Result<(), AcquireError> {
        self.validation_error = None;
        match media::acquire_image(bytes, mime_type) {
            Ok(acquired) => {
                tracing::info!(
                    "📥 upload accepted: {} {}x{}",
                    acquired.source.mime_type,
                    acquired.preview.width,
                    acquired.preview.height
                );
                self.image = Some(acquired);
                // The new image is laid out again before a selection exists.
                self.displayed = None;
                if let ModeSettings::Crop { selection, .. } = &mut self.settings {
                    *selection = None;
                }
                Ok(())
            }
            Err(e) => {
                self.validation_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) -> bool {
        self.settings.set_prompt(text)
    }

    pub fn set_image_count(&mut self, count: u32) -> bool {
        self.settings.set_image_count(count)
    }

    pub fn set_aspect_ratio(&mut self, ratio: AspectRatio) -> bool {
        self.settings.set_aspect_ratio(ratio)
    }

    pub fn set_headshot_style(&mut self, id: impl Into<String>) -> bool {
        self.settings.set_headshot_style(id)
    }

    pub fn set_enhancement_level(&mut self, level: EnhancementLevel) -> bool {
        self.settings.set_enhancement_level(level)
    }

    // ========== CROP ==========
    /// Layout size of the preview the selection is drawn on.
    pub fn set_displayed_size(&mut self, size: DisplaySize) {
        self.displayed = Some(size);
        self.recenter_crop();
    }

    pub fn set_crop_aspect(&mut self, aspect: CropAspect) -> bool {
        if !self.settings.set_crop_aspect(aspect) {
            return false;
        }
        self.recenter_crop();
        true
    }

    pub fn set_crop(&mut self, region: CropRegion) -> bool {
        self.settings.set_crop_selection(region)
    }

    fn recenter_crop(&mut self) {
        let (Some(size), ModeSettings::Crop { aspect, .. }) = (self.displayed, &self.settings) else {
            return;
        };
        if let Some(ratio) = aspect.ratio() {
            let region = crop::center_aspect_crop(size.width, size.height, ratio);
            self.settings.set_crop_selection(region);
        }
    }

    // ========== SUBMISSION ==========
    /// Validate and start a submission.
    ///
    /// Validation failures only set the inline message. Crops run here and show
    /// their result at once; every other mode returns the relay body to send.
    pub fn submit(&mut self, pixel_ratio: f64) -> Result<SubmitOutcome, ValidationError> {
        self.validation_error = None;

        let image = self.image.as_ref().map(|i| &i.source);
        if let Err(e) = modes::validate_submission(&self.settings, image) {
            tracing::debug!("⚠️ submission blocked: {}", e);
            self.validation_error = Some(e.message().to_string());
            return Err(e);
        }

        if self.mode() == EditingMode::Crop {
            return self.crop_locally(pixel_ratio);
        }

        self.latest_token += 1;
        // Text-to-image never carries an upload.
        let image = if descriptor(self.mode()).requires_image() {
            self.image.as_ref().map(|i| i.source.to_inline())
        } else {
            None
        };
        let body = GenerateRequestBody {
            image,
            settings: self.settings.to_wire(),
            menu_key: self.mode(),
        };
        self.display = DisplayState::Loading;
        self.zoom.clear();
        tracing::info!("🚀 submission {} for {}", self.latest_token, body.menu_key);

        Ok(SubmitOutcome::Dispatch(PendingSubmission {
            token: self.latest_token,
            body,
        }))
    }

    fn crop_locally(&mut self, pixel_ratio: f64) -> Result<SubmitOutcome, ValidationError> {
        let (Some(acquired), Some(region), Some(displayed)) = (
            self.image.as_ref(),
            self.settings.crop_selection(),
            self.displayed,
        ) else {
            let err = ValidationError::new(modes::MISSING_CROP_REGION);
            self.validation_error = Some(err.message().to_string());
            return Err(err);
        };

        match crop::crop_image(&acquired.source.bytes, region, displayed, pixel_ratio) {
            Ok(cropped) => {
                tracing::info!("✂️ cropped to {}x{}", cropped.width, cropped.height);
                // A local result supersedes anything still in flight.
                self.latest_token += 1;
                self.display = DisplayState::Ready(vec![BASE64.encode(&cropped.png)]);
                self.zoom.clear();
                Ok(SubmitOutcome::Cropped)
            }
            Err(e) => {
                let err = ValidationError::new(format!("{}{}", CROP_FAILED_PREFIX, e));
                self.validation_error = Some(err.message().to_string());
                Err(err)
            }
        }
    }

    /// Apply a relay outcome. Returns `false` when `token` is stale and the
    /// outcome was dropped.
    pub fn complete(&mut self, token: u64, outcome: Result<Vec<String>, String>) -> bool {
        if token != self.latest_token {
            tracing::debug!("🗑️ dropping stale response {} (latest {})", token, self.latest_token);
            return false;
        }

        let outcome = match outcome {
            Ok(images) if images.is_empty() => Err(TransportError::EmptyResult.to_string()),
            other => other,
        };
        self.display = match outcome {
            Ok(images) => DisplayState::Ready(images),
            Err(message) => {
                tracing::error!("❌ submission {} failed: {}", token, message);
                DisplayState::Failed(format!("{}{}", GENERATION_FAILED_PREFIX, message))
            }
        };
        self.zoom.clear();
        true
    }

    /// Submit, await the relay and apply the result.
    pub async fn submit_with<T>(&mut self, transport: &T, pixel_ratio: f64) -> Result<(), ValidationError>
    where
        T: GenerateTransport + Sync,
    {
        match self.submit(pixel_ratio)? {
            SubmitOutcome::Cropped => Ok(()),
            SubmitOutcome::Dispatch(pending) => {
                let outcome = transport
                    .generate(&pending.body)
                    .await
                    .map_err(|e| e.to_string());
                self.complete(pending.token, outcome);
                Ok(())
            }
        }
    }

    // ========== RESULTS ==========
    /// Zoom into or out of result `index`. Ignored when there is no such result.
    pub fn toggle_zoom(&mut self, index: usize) -> bool {
        match &self.display {
            DisplayState::Ready(images) if index < images.len() => {
                self.zoom.toggle(index);
                true
            }
            _ => false,
        }
    }

    pub fn download(&self, index: usize, at: DateTime<Utc>) -> Result<DownloadFile, DownloadError> {
        match &self.display {
            DisplayState::Ready(images) => images
                .get(index)
                .ok_or(DownloadError::NothingToDownload)
                .and_then(|image| download_file(image, index, at)),
            _ => Err(DownloadError::NothingToDownload),
        }
    }

    /// Every displayed result as a file, in display order.
    pub fn downloads(&self, at: DateTime<Utc>) -> Result<Vec<DownloadFile>, DownloadError> {
        match &self.display {
            DisplayState::Ready(images) if !images.is_empty() => images
                .iter()
                .enumerate()
                .map(|(index, image)| download_file(image, index, at))
                .collect(),
            _ => Err(DownloadError::NothingToDownload),
        }
    }
}

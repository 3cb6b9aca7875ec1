use super::model::{AcquireError, AcquiredImage, Preview, SourceImage};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::GenericImageView;

/// Upload limit, inclusive.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/png", "image/jpeg", "image/gif"];

/// Validate an uploaded file and build its preview.
///
/// Size is checked first so oversized files are never decoded.
pub fn acquire_image(bytes: Vec<u8>, mime_type: &str) -> Result<AcquiredImage, AcquireError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        tracing::warn!("📦 upload rejected: {} bytes over limit", bytes.len());
        return Err(AcquireError::FileTooLarge { size: bytes.len() });
    }

    let mime_type = mime_type.trim().to_ascii_lowercase();
    if !ACCEPTED_MIME_TYPES.contains(&mime_type.as_str()) {
        return Err(AcquireError::UnsupportedType { mime_type });
    }

    let decoded =
        image::load_from_memory(&bytes).map_err(|e| AcquireError::Unreadable(e.to_string()))?;
    let (width, height) = decoded.dimensions();

    let preview = Preview {
        width,
        height,
        data_url: format!("data:{};base64,{}", mime_type, BASE64.encode(&bytes)),
    };

    Ok(AcquiredImage {
        source: SourceImage::new(bytes, mime_type),
        preview,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::InlineImage;
    use image::{DynamicImage, ImageOutputFormat, RgbImage};
    use std::io::Cursor;

    fn png(width: u32, height: u32) -> Vec<u8> {
        let mut out = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
            .unwrap();
        out
    }

    #[test]
    fn accepts_small_png_and_builds_preview() {
        let acquired = acquire_image(png(4, 3), "image/png").unwrap();
        assert_eq!((acquired.preview.width, acquired.preview.height), (4, 3));
        assert!(acquired.preview.data_url.starts_with("data:image/png;base64,"));
        assert_eq!(acquired.source.mime_type, "image/png");
    }

    #[test]
    fn rejects_files_over_ten_megabytes() {
        let err = acquire_image(vec![0u8; MAX_UPLOAD_BYTES + 1], "image/png").unwrap_err();
        assert_eq!(err, AcquireError::FileTooLarge { size: MAX_UPLOAD_BYTES + 1 });
        assert_eq!(err.to_string(), "Ukuran file tidak boleh melebihi 10MB.");
    }

    #[test]
    fn rejects_unlisted_types() {
        let err = acquire_image(png(2, 2), "image/webp").unwrap_err();
        assert!(matches!(err, AcquireError::UnsupportedType { .. }));
    }

    #[test]
    fn rejects_bytes_that_do_not_decode() {
        let err = acquire_image(b"GIF89a-truncated".to_vec(), "image/gif").unwrap_err();
        assert!(matches!(err, AcquireError::Unreadable(_)));
    }

    #[test]
    fn inline_form_is_base64_with_camel_case_keys() {
        let source = SourceImage::new(vec![1, 2, 3], "image/jpeg");
        let inline = source.to_inline();
        assert_eq!(inline, InlineImage { data: "AQID".into(), mime_type: "image/jpeg".into() });
        let json = serde_json::to_value(&inline).unwrap();
        assert_eq!(json, serde_json::json!({ "data": "AQID", "mimeType": "image/jpeg" }));
    }
}

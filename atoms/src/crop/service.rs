use super::model::{CropError, CropRegion, CropUnit, CroppedImage, DisplaySize};
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageOutputFormat, RgbaImage};
use std::io::Cursor;

/// Crop `source` to the region the user selected on the displayed image.
///
/// The selection is mapped into native pixels with the displayed→native scale,
/// then drawn onto a surface of the displayed selection size multiplied by
/// `pixel_ratio`, and encoded as PNG. Parts of the selection that fall outside
/// the image stay transparent. Same inputs always give the same bytes.
pub fn crop_image(
    source: &[u8],
    region: &CropRegion,
    displayed: DisplaySize,
    pixel_ratio: f64,
) -> Result<CroppedImage, CropError> {
    if !(displayed.width > 0.0 && displayed.height > 0.0) {
        return Err(CropError::InvalidCropRegion);
    }

    let region = region.to_pixels(displayed);
    let ratio = if pixel_ratio.is_finite() && pixel_ratio > 0.0 {
        pixel_ratio
    } else {
        1.0
    };

    let out_width = (region.width * ratio).round();
    let out_height = (region.height * ratio).round();
    if !(out_width >= 1.0 && out_height >= 1.0) {
        return Err(CropError::InvalidCropRegion);
    }
    let (width, height) = (out_width as u32, out_height as u32);

    let img = image::load_from_memory(source).map_err(|e| CropError::Decode(e.to_string()))?;
    let (native_width, native_height) = img.dimensions();

    let horizontal = AxisSpan::map(
        region.x,
        region.width,
        native_width as f64 / displayed.width,
        native_width,
        ratio,
        width,
    )
    .ok_or(CropError::InvalidCropRegion)?;
    let vertical = AxisSpan::map(
        region.y,
        region.height,
        native_height as f64 / displayed.height,
        native_height,
        ratio,
        height,
    )
    .ok_or(CropError::InvalidCropRegion)?;

    let mut cropped = img.crop_imm(
        horizontal.src_start,
        vertical.src_start,
        horizontal.src_len,
        vertical.src_len,
    );
    if cropped.dimensions() != (horizontal.dst_len, vertical.dst_len) {
        cropped = cropped.resize_exact(horizontal.dst_len, vertical.dst_len, FilterType::Lanczos3);
    }

    let output = if (horizontal.dst_len, vertical.dst_len) == (width, height) {
        cropped
    } else {
        let mut canvas = RgbaImage::new(width, height);
        imageops::replace(
            &mut canvas,
            &cropped.to_rgba8(),
            i64::from(horizontal.dst_start),
            i64::from(vertical.dst_start),
        );
        DynamicImage::ImageRgba8(canvas)
    };

    let mut png = Vec::new();
    output
        .write_to(&mut Cursor::new(&mut png), ImageOutputFormat::Png)
        .map_err(|e| CropError::Encode(e.to_string()))?;

    tracing::debug!(
        "✂️ crop: native={}x{} source=({},{} {}x{}) dest=({},{} {}x{}) out={}x{}",
        native_width,
        native_height,
        horizontal.src_start,
        vertical.src_start,
        horizontal.src_len,
        vertical.src_len,
        horizontal.dst_start,
        vertical.dst_start,
        horizontal.dst_len,
        vertical.dst_len,
        width,
        height
    );

    Ok(CroppedImage { width, height, png })
}

/// One axis of the crop: the native source span and where it lands in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AxisSpan {
    src_start: u32,
    src_len: u32,
    dst_start: u32,
    dst_len: u32,
}

impl AxisSpan {
    /// `start`/`len` are displayed pixels, `scale` is displayed→native. Only the
    /// edges clipped by the image move away from the output borders.
    fn map(start: f64, len: f64, scale: f64, native: u32, ratio: f64, out: u32) -> Option<Self> {
        let native_f = native as f64;
        let lo_f = start * scale;
        let hi_f = (start + len) * scale;
        let lo = lo_f.round().clamp(0.0, native_f);
        let hi = hi_f.round().clamp(0.0, native_f);
        if hi <= lo {
            return None;
        }

        let out_f = out as f64;
        let dst_lo = if lo_f < 0.0 {
            ((lo / scale - start) * ratio).round().clamp(0.0, out_f)
        } else {
            0.0
        };
        let dst_hi = if hi_f > native_f {
            ((hi / scale - start) * ratio).round().clamp(0.0, out_f)
        } else {
            out_f
        };
        if dst_hi <= dst_lo {
            return None;
        }

        Some(Self {
            src_start: lo as u32,
            src_len: (hi - lo) as u32,
            dst_start: dst_lo as u32,
            dst_len: (dst_hi - dst_lo) as u32,
        })
    }
}

/// Initial selection for an aspect-locked crop: 90% of the width at `aspect`
/// (shrunk to fit the height if needed), centred, in percent units.
pub fn center_aspect_crop(media_width: f64, media_height: f64, aspect: f64) -> CropRegion {
    let mut width = media_width * 0.9;
    let mut height = width / aspect;
    if height > media_height {
        height = media_height;
        width = height * aspect;
    }

    let width_pct = width / media_width * 100.0;
    let height_pct = height / media_height * 100.0;
    CropRegion::new(
        CropUnit::Percent,
        (100.0 - width_pct) / 2.0,
        (100.0 - height_pct) / 2.0,
        width_pct,
        height_pct,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    /// 200x100 blue image with a red square at native (40..80, 20..60).
    fn fixture_png() -> Vec<u8> {
        let img = RgbaImage::from_fn(200, 100, |x, y| {
            if (40..80).contains(&x) && (20..60).contains(&y) {
                RED
            } else {
                BLUE
            }
        });
        let mut out = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), ImageOutputFormat::Png)
            .unwrap();
        out
    }

    fn displayed() -> DisplaySize {
        // Image shown at half its native size.
        DisplaySize::new(100.0, 50.0)
    }

    #[test]
    fn output_size_is_displayed_selection_times_pixel_ratio() {
        let region = CropRegion::pixels(10.0, 5.0, 30.0, 20.0);
        let one = crop_image(&fixture_png(), &region, displayed(), 1.0).unwrap();
        assert_eq!((one.width, one.height), (30, 20));

        let two = crop_image(&fixture_png(), &region, displayed(), 2.0).unwrap();
        assert_eq!((two.width, two.height), (60, 40));

        let decoded = image::load_from_memory(&two.png).unwrap();
        assert_eq!(decoded.dimensions(), (60, 40));
    }

    #[test]
    fn selection_maps_to_native_pixels() {
        // Displayed (20,10) 20x20 is native (40,20) 40x40: exactly the red square.
        let region = CropRegion::pixels(20.0, 10.0, 20.0, 20.0);
        let out = crop_image(&fixture_png(), &region, displayed(), 2.0).unwrap();
        let decoded = image::load_from_memory(&out.png).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (40, 40));
        assert!(decoded.pixels().all(|p| *p == RED));
    }

    #[test]
    fn percent_selection_is_converted_first() {
        let pct = CropRegion::new(CropUnit::Percent, 20.0, 20.0, 20.0, 40.0);
        let px = CropRegion::pixels(20.0, 10.0, 20.0, 20.0);
        let a = crop_image(&fixture_png(), &pct, displayed(), 1.0).unwrap();
        let b = crop_image(&fixture_png(), &px, displayed(), 1.0).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_crops_are_identical() {
        let region = CropRegion::pixels(3.3, 7.7, 41.2, 19.9);
        let a = crop_image(&fixture_png(), &region, displayed(), 1.5).unwrap();
        let b = crop_image(&fixture_png(), &region, displayed(), 1.5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_area_selection_is_rejected() {
        for region in [
            CropRegion::pixels(10.0, 10.0, 0.0, 20.0),
            CropRegion::pixels(10.0, 10.0, 20.0, 0.0),
            CropRegion::pixels(10.0, 10.0, 0.3, 20.0),
        ] {
            let err = crop_image(&fixture_png(), &region, displayed(), 1.0).unwrap_err();
            assert!(matches!(err, CropError::InvalidCropRegion), "{region:?}");
        }
    }

    #[test]
    fn selection_outside_the_image_is_rejected() {
        let region = CropRegion::pixels(150.0, 10.0, 20.0, 20.0);
        let err = crop_image(&fixture_png(), &region, displayed(), 1.0).unwrap_err();
        assert!(matches!(err, CropError::InvalidCropRegion));
    }

    #[test]
    fn selection_hanging_off_an_edge_keeps_its_scale() {
        // Red channel is the column index.
        let strip = RgbaImage::from_fn(100, 10, |x, _| Rgba([x as u8, 0, 0, 255]));
        let mut source = Vec::new();
        DynamicImage::ImageRgba8(strip)
            .write_to(&mut Cursor::new(&mut source), ImageOutputFormat::Png)
            .unwrap();

        let region = CropRegion::pixels(90.0, 0.0, 20.0, 10.0);
        let out = crop_image(&source, &region, DisplaySize::new(100.0, 10.0), 1.0).unwrap();
        assert_eq!((out.width, out.height), (20, 10));

        let decoded = image::load_from_memory(&out.png).unwrap().to_rgba8();
        for x in 0..10 {
            assert_eq!(decoded.get_pixel(x, 5).0, [90 + x as u8, 0, 0, 255]);
        }
        for x in 10..20 {
            assert_eq!(decoded.get_pixel(x, 5).0[3], 0, "column {x} should be transparent");
        }
    }

    #[test]
    fn selection_starting_before_the_image_is_offset() {
        // Displayed (-10,10) 20x20 at half size: the red square's left half lands
        // in the right half of the output.
        let region = CropRegion::pixels(10.0, 10.0, 20.0, 20.0);
        let shifted = CropRegion::pixels(-10.0, 10.0, 20.0, 20.0);
        let full = crop_image(&fixture_png(), &region, displayed(), 2.0).unwrap();
        let out = crop_image(&fixture_png(), &shifted, displayed(), 2.0).unwrap();
        assert_eq!((out.width, out.height), (full.width, full.height));

        let decoded = image::load_from_memory(&out.png).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(5, 5).0[3], 0);
        assert_eq!(*decoded.get_pixel(25, 5), BLUE);
    }

    #[test]
    fn undecodable_source_fails() {
        let region = CropRegion::pixels(0.0, 0.0, 10.0, 10.0);
        let err = crop_image(b"not an image", &region, displayed(), 1.0).unwrap_err();
        assert!(matches!(err, CropError::Decode(_)));
    }

    #[test]
    fn center_aspect_crop_fits_wide_media() {
        let crop = center_aspect_crop(200.0, 100.0, 1.0);
        assert_eq!(crop.unit, CropUnit::Percent);
        assert_eq!((crop.x, crop.y, crop.width, crop.height), (25.0, 0.0, 50.0, 100.0));
    }

    #[test]
    fn center_aspect_crop_on_tall_media_uses_ninety_percent_width() {
        let crop = center_aspect_crop(100.0, 200.0, 1.0);
        assert!((crop.width - 90.0).abs() < 1e-9);
        assert!((crop.height - 45.0).abs() < 1e-9);
        assert!((crop.x - 5.0).abs() < 1e-9);
        assert!((crop.y - 27.5).abs() < 1e-9);
    }
}

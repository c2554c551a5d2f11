//! Layer composition: decode, stretch, and alpha-blend images.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use tracing::debug;

use crate::CanvasSize;
use crate::error::{CompositionError, ImageField};

/// Resampling filter used for every resize. Bilinear.
pub const RESIZE_FILTER: FilterType = FilterType::Triangle;

/// Decode background and overlay, stretch both to `size`, and blend the
/// overlay over the background.
pub fn compose_base(
    background: &[u8],
    overlay_bytes: &[u8],
    size: CanvasSize,
) -> Result<RgbaImage, CompositionError> {
    let background = decode(background, ImageField::Background)?;
    let top = decode(overlay_bytes, ImageField::Overlay)?;

    let mut canvas = stretch(&background, size);
    overlay(&mut canvas, &stretch(&top, size), 0, 0);
    Ok(canvas)
}

fn decode(bytes: &[u8], field: ImageField) -> Result<DynamicImage, CompositionError> {
    let img = image::load_from_memory(bytes)
        .map_err(|source| CompositionError::ImageDecode { field, source })?;
    debug!(%field, width = img.width(), height = img.height(), "Decoded input image");
    Ok(img)
}

/// Resize to exactly `size`, ignoring aspect ratio.
pub fn stretch(img: &DynamicImage, size: CanvasSize) -> RgbaImage {
    let (width, height) = (size.width.max(1), size.height.max(1));
    if img.width() == width && img.height() == height {
        return img.to_rgba8();
    }
    img.resize_exact(width, height, RESIZE_FILTER).to_rgba8()
}

/// Composite `top` over `base` with its top-left corner at (`x`, `y`).
///
/// Pixels falling outside `base` are skipped.
pub fn overlay(base: &mut RgbaImage, top: &RgbaImage, x: u32, y: u32) {
    for (dx, dy, pixel) in top.enumerate_pixels() {
        let target_x = x + dx;
        let target_y = y + dy;
        if target_x < base.width() && target_y < base.height() {
            let dst = base.get_pixel_mut(target_x, target_y);
            *dst = over(*dst, *pixel);
        }
    }
}

/// Porter-Duff "over" on straight (non-premultiplied) RGBA.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let src_a = f32::from(src[3]) / 255.0;
    let dst_a = f32::from(dst[3]) / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);

    let channel = |i: usize| {
        let c = (f32::from(src[i]) * src_a + f32::from(dst[i]) * dst_a * (1.0 - src_a)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::solid_png;

    #[test]
    fn over_opaque_destination_matches_linear_mix() {
        let out = over(Rgba([0, 0, 0, 255]), Rgba([255, 255, 255, 128]));
        assert_eq!(out, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn over_transparent_destination_keeps_source_color() {
        let out = over(Rgba([0, 0, 0, 0]), Rgba([200, 100, 50, 77]));
        assert_eq!(out, Rgba([200, 100, 50, 77]));
    }

    #[test]
    fn over_with_transparent_source_is_identity() {
        let dst = Rgba([1, 2, 3, 4]);
        assert_eq!(over(dst, Rgba([255, 255, 255, 0])), dst);
    }

    #[test]
    fn compose_base_stretches_any_input_to_canvas() {
        let size = CanvasSize::new(512, 512);
        for (w, h) in [(10, 700), (1024, 32), (512, 512), (1, 1)] {
            let bg = solid_png(w, h, Rgba([10, 20, 30, 255]));
            let ov = solid_png(h, w, Rgba([0, 0, 0, 100]));
            let canvas = compose_base(&bg, &ov, size).unwrap();
            assert_eq!(canvas.dimensions(), (512, 512));
        }
    }

    #[test]
    fn compose_base_blends_overlay_over_background() {
        let bg = solid_png(64, 64, Rgba([200, 0, 0, 255]));
        let ov = solid_png(16, 16, Rgba([0, 0, 200, 128]));
        let canvas = compose_base(&bg, &ov, CanvasSize::new(32, 32)).unwrap();
        let px = canvas.get_pixel(16, 16);
        assert_eq!(px[3], 255);
        assert!(px[0] > 90 && px[0] < 110, "red was {}", px[0]);
        assert!(px[2] > 90 && px[2] < 110, "blue was {}", px[2]);
    }

    #[test]
    fn compose_base_names_the_failing_field() {
        let good = solid_png(8, 8, Rgba([0, 0, 0, 255]));

        let err = compose_base(b"nope", &good, CanvasSize::default()).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::ImageDecode { field: ImageField::Background, .. }
        ));

        let err = compose_base(&good, b"nope", CanvasSize::default()).unwrap_err();
        assert!(matches!(
            err,
            CompositionError::ImageDecode { field: ImageField::Overlay, .. }
        ));
    }

    #[test]
    fn overlay_does_not_panic_on_out_of_bounds() {
        let mut base = RgbaImage::new(100, 100);
        let top = RgbaImage::from_pixel(50, 50, Rgba([255, 0, 0, 255]));
        overlay(&mut base, &top, 80, 80);
        assert_eq!(base.get_pixel(99, 99), &Rgba([255, 0, 0, 255]));
        assert_eq!(base.get_pixel(79, 79), &Rgba([0, 0, 0, 0]));
    }
}

//! Blurred drop shadow beneath the text.

use image::{Rgba, RgbaImage};
use imageproc::filter::gaussian_blur_f32;
use tracing::debug;

use crate::compose;
use crate::font::LoadedFont;
use crate::layout::LayoutResult;
use crate::render::draw_blocks;

/// Black at ~78% opacity.
pub const SHADOW_COLOR: Rgba<u8> = Rgba([0, 0, 0, 200]);

/// Draw both text blocks onto a transparent layer, blur it, and composite
/// the layer over `canvas`.
///
/// Must run before [`crate::render::render_text`] so the sharp glyphs sit
/// on top of the shadow.
pub fn render_shadow(
    mut canvas: RgbaImage,
    layout: &LayoutResult,
    quote_font: &LoadedFont,
    author_font: &LoadedFont,
    blur_radius: u32,
) -> RgbaImage {
    let layer = shadow_layer(
        canvas.width(),
        canvas.height(),
        layout,
        quote_font,
        author_font,
        blur_radius,
    );
    compose::overlay(&mut canvas, &layer, 0, 0);
    canvas
}

/// The blurred shadow layer on its own, fully transparent outside the text.
pub fn shadow_layer(
    width: u32,
    height: u32,
    layout: &LayoutResult,
    quote_font: &LoadedFont,
    author_font: &LoadedFont,
    blur_radius: u32,
) -> RgbaImage {
    let mut layer = RgbaImage::new(width, height);
    draw_blocks(
        &mut layer,
        layout,
        quote_font,
        author_font,
        SHADOW_COLOR,
        SHADOW_COLOR,
    );
    blur(layer, blur_radius)
}

/// Gaussian blur with sigma equal to the radius. Radius 0 leaves the layer
/// sharp.
///
/// Sigma is capped at the layer's longer edge; past that the blur is already
/// flat across the canvas and the kernel only gets slower.
fn blur(layer: RgbaImage, radius: u32) -> RgbaImage {
    if radius == 0 {
        return layer;
    }
    let sigma = radius.min(max_blur_sigma(&layer));
    debug!(radius, sigma, "Blurring shadow layer");
    gaussian_blur_f32(&layer, sigma as f32)
}

fn max_blur_sigma(layer: &RgbaImage) -> u32 {
    layer.width().max(layer.height()).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CanvasSize;
    use crate::layout::layout;
    use crate::tests::test_font;

    fn sample_layout() -> (LayoutResult, LoadedFont) {
        let font = test_font(48);
        let result =
            layout("Shadow", "Caster", &font, &font, CanvasSize::new(256, 256), 20).unwrap();
        (result, font)
    }

    fn covered(layer: &RgbaImage) -> usize {
        layer.pixels().filter(|p| p[3] > 0).count()
    }

    #[test]
    fn zero_radius_shadow_is_sharp_but_visible() {
        let (result, font) = sample_layout();
        let layer = shadow_layer(256, 256, &result, &font, &font, 0);
        assert!(covered(&layer) > 0);
        assert!(layer.pixels().any(|p| p[3] >= SHADOW_COLOR[3] - 1));
        assert!(layer.pixels().all(|p| p[0] == 0 && p[1] == 0 && p[2] == 0));
    }

    #[test]
    fn larger_radius_spreads_wider() {
        let (result, font) = sample_layout();
        let sharp = shadow_layer(256, 256, &result, &font, &font, 0);
        let soft = shadow_layer(256, 256, &result, &font, &font, 5);
        assert!(covered(&soft) > covered(&sharp));
    }

    #[test]
    fn shadow_darkens_canvas_under_text() {
        let (result, font) = sample_layout();
        let canvas = RgbaImage::from_pixel(256, 256, Rgba([255, 255, 255, 255]));
        let shadowed = render_shadow(canvas.clone(), &result, &font, &font, 0);
        assert_ne!(shadowed, canvas);
        assert!(shadowed.pixels().all(|p| p[3] == 255));
    }

    #[test]
    fn zero_radius_differs_from_no_shadow() {
        let (result, font) = sample_layout();
        let canvas = RgbaImage::from_pixel(256, 256, Rgba([90, 120, 150, 255]));
        let shadowed = render_shadow(canvas.clone(), &result, &font, &font, 0);
        assert!(shadowed.pixels().zip(canvas.pixels()).any(|(a, b)| a != b));
    }

    #[test]
    fn huge_radius_is_capped_at_canvas_size() {
        let font = test_font(24);
        let result = layout("Wide", "Blur", &font, &font, CanvasSize::new(64, 64), 4).unwrap();
        let capped = shadow_layer(64, 64, &result, &font, &font, 64);
        let huge = shadow_layer(64, 64, &result, &font, &font, u32::MAX);
        assert_eq!(huge, capped);
        assert!(covered(&huge) > 0);
    }
}

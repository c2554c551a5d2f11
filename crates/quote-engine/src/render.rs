//! Final sharp text pass.

use image::{Rgba, RgbaImage};

use crate::font::LoadedFont;
use crate::layout::LayoutResult;
use crate::text;

/// Draw the quote block and author line at their layout origins.
pub fn draw_blocks(
    img: &mut RgbaImage,
    layout: &LayoutResult,
    quote_font: &LoadedFont,
    author_font: &LoadedFont,
    quote_color: Rgba<u8>,
    author_color: Rgba<u8>,
) {
    text::draw_lines(
        img,
        quote_font,
        layout.quote_origin,
        &layout.quote_lines,
        layout.line_spacing,
        quote_color,
    );
    let (x, y) = layout.author_origin;
    text::draw_text(img, author_font, x, y, &layout.author_text, author_color);
}

/// Draw the crisp top layer in the requested colors. Terminal drawing stage.
pub fn render_text(
    mut canvas: RgbaImage,
    layout: &LayoutResult,
    quote_font: &LoadedFont,
    author_font: &LoadedFont,
    quote_color: Rgba<u8>,
    author_color: Rgba<u8>,
) -> RgbaImage {
    draw_blocks(
        &mut canvas,
        layout,
        quote_font,
        author_font,
        quote_color,
        author_color,
    );
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout;
    use crate::{CanvasSize, TextBox};
    use crate::tests::test_font;

    #[test]
    fn text_lands_inside_layout_boxes() {
        let quote_font = test_font(48);
        let author_font = test_font(40);
        let size = CanvasSize::default();
        let result = layout("Hello there", "Me", &quote_font, &author_font, size, 20).unwrap();

        let canvas = RgbaImage::new(512, 512);
        let red = Rgba([255, 0, 0, 255]);
        let blue = Rgba([0, 0, 255, 255]);
        let out = render_text(canvas, &result, &quote_font, &author_font, red, blue);

        let inside = |(x, y): (i32, i32), (ox, oy): (i32, i32), b: TextBox| {
            x >= ox + b.left && x < ox + b.right && y >= oy + b.top && y < oy + b.bottom
        };
        let mut reds = 0;
        let mut blues = 0;
        for (x, y, px) in out.enumerate_pixels() {
            let (x, y) = (x as i32, y as i32);
            if px[3] == 0 {
                continue;
            }
            if px[0] > 0 {
                reds += 1;
                assert!(inside((x, y), result.quote_origin, result.quote_box));
            }
            if px[2] > 0 {
                blues += 1;
                assert!(inside((x, y), result.author_origin, result.author_box));
            }
        }
        assert!(reds > 0 && blues > 0);
    }
}

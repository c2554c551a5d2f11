//! Glyph measurement and drawing.
//!
//! Drawing goes through imageproc's `draw_text_mut`. Measurement walks
//! glyphs exactly the way that call lays them out, so a bounding box always
//! describes the pixels that get painted. Text origins follow the usual
//! top-left convention: the baseline sits one ascent below `y`.

use ab_glyph::{Font, GlyphId, OutlinedGlyph, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;

use crate::font::LoadedFont;

/// Pixel bounding box relative to a text origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl TextBox {
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// Walk the glyphs of one line, handing each visible glyph to `f`.
///
/// Mirrors imageproc's glyph layout: kerning is applied after a visible
/// glyph and only between visible glyphs. Returns the final pen position.
fn layout_line(font: &LoadedFont, text: &str, mut f: impl FnMut(OutlinedGlyph)) -> f32 {
    let scale = font.scale();
    let scaled = font.font().as_scaled(scale);
    let mut caret = 0.0f32;
    let mut last: Option<GlyphId> = None;

    for ch in text.chars() {
        let glyph_id = scaled.glyph_id(ch);
        let glyph = glyph_id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(glyph_id);

        if let Some(outlined) = scaled.outline_glyph(glyph) {
            if let Some(last) = last {
                caret += scaled.kern(glyph_id, last);
            }
            last = Some(glyph_id);
            f(outlined);
        }
    }

    caret
}

/// Pen advance of a single line in whole pixels.
pub fn measure_text_width(font: &LoadedFont, text: &str) -> u32 {
    layout_line(font, text, |_| {}).ceil().max(0.0) as u32
}

/// Ink extents of one line, or `None` if nothing visible is drawn.
fn line_ink(font: &LoadedFont, text: &str) -> (f32, Option<[f32; 4]>) {
    let mut ink: Option<[f32; 4]> = None;
    let advance = layout_line(font, text, |g| {
        let b = g.px_bounds();
        ink = Some(match ink {
            Some([l, t, r, btm]) => [
                l.min(b.min.x),
                t.min(b.min.y),
                r.max(b.max.x),
                btm.max(b.max.y),
            ],
            None => [b.min.x, b.min.y, b.max.x, b.max.y],
        });
    });
    (advance, ink)
}

/// Bounding box of a single line drawn at (0, 0).
///
/// Spans from the pen start (or further left ink) to the larger of the
/// advance and the rightmost ink, and from the topmost to the lowest ink.
pub fn line_bbox(font: &LoadedFont, text: &str) -> TextBox {
    multiline_bbox(font, std::slice::from_ref(&text), 0)
}

/// Bounding box of `lines` drawn at (0, 0), `line_spacing` pixels apart.
pub fn multiline_bbox<S: AsRef<str>>(
    font: &LoadedFont,
    lines: &[S],
    line_spacing: i32,
) -> TextBox {
    let mut bbox = TextBox::default();
    let mut has_ink = false;

    for (i, line) in lines.iter().enumerate() {
        let offset = line_spacing * i as i32;
        let (advance, ink) = line_ink(font, line.as_ref());
        bbox.right = bbox.right.max(advance.ceil() as i32);

        let Some([l, t, r, b]) = ink else { continue };
        let (top, bottom) = (t.floor() as i32 + offset, b.ceil() as i32 + offset);
        bbox.left = bbox.left.min(l.floor() as i32);
        bbox.right = bbox.right.max(r.ceil() as i32);
        if has_ink {
            bbox.top = bbox.top.min(top);
            bbox.bottom = bbox.bottom.max(bottom);
        } else {
            bbox.top = top;
            bbox.bottom = bottom;
            has_ink = true;
        }
    }

    bbox
}

/// Draw one line with its origin at (`x`, `y`).
///
/// Coverage is mixed into every channel, alpha included, so a translucent
/// color lowers the alpha of the pixels it covers. Lines whose ink misses
/// the canvas are skipped without rasterizing.
pub fn draw_text(
    img: &mut RgbaImage,
    font: &LoadedFont,
    x: i32,
    y: i32,
    text: &str,
    color: Rgba<u8>,
) {
    let (_, ink) = line_ink(font, text);
    let Some([l, t, r, b]) = ink else { return };
    let (width, height) = (img.width() as f32, img.height() as f32);
    let (x0, y0) = (x as f32, y as f32);
    if x0 + r <= 0.0 || y0 + b <= 0.0 || x0 + l >= width || y0 + t >= height {
        return;
    }

    draw_text_mut(img, color, x, y, font.scale(), font.font(), text);
}

/// Draw `lines` left-aligned from (`x`, `y`), `line_spacing` pixels apart.
pub fn draw_lines<S: AsRef<str>>(
    img: &mut RgbaImage,
    font: &LoadedFont,
    (x, y): (i32, i32),
    lines: &[S],
    line_spacing: i32,
    color: Rgba<u8>,
) {
    for (i, line) in lines.iter().enumerate() {
        draw_text(img, font, x, y + line_spacing * i as i32, line.as_ref(), color);
    }
}

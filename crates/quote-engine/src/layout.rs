//! Quote card layout: wrap width, line wrapping and block positions.

use tracing::debug;

use crate::CanvasSize;
use crate::error::LayoutError;
use crate::font::LoadedFont;
use crate::text::{self, TextBox};
use crate::wrap;

/// Spaces substituted for each line break in the quote.
///
/// Breaks are padding, not hard breaks: a run this wide usually exceeds the
/// wrap width and pushes the following word onto a new line, but the wrapper
/// still decides. Changing this alters rendered output.
pub const LINE_BREAK_PADDING: usize = 50;

/// Vertical gap between the quote block and author line used when centering.
pub const QUOTE_AUTHOR_GAP: i32 = 10;

/// Wrapped text and draw origins for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutResult {
    pub max_chars_per_line: usize,
    pub quote_lines: Vec<String>,
    pub author_text: String,
    pub line_spacing: i32,
    pub quote_box: TextBox,
    pub author_box: TextBox,
    pub quote_origin: (i32, i32),
    pub author_origin: (i32, i32),
}

impl LayoutResult {
    /// The wrapped quote as a single `\n`-joined string.
    pub fn quote_text(&self) -> String {
        self.quote_lines.join("\n")
    }
}

/// Quote the text and flatten line breaks into [`LINE_BREAK_PADDING`] spaces.
pub fn preprocess_quote(quote: &str) -> String {
    let padding = " ".repeat(LINE_BREAK_PADDING);
    let flattened = quote
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', &padding);
    format!("\"{flattened}\"")
}

pub fn author_caption(author: &str) -> String {
    format!("- {author}")
}

/// Estimate how many characters fit on a line from the mean letter advance.
pub fn max_chars_per_line(
    font: &LoadedFont,
    width: u32,
    margin: u32,
) -> Result<usize, LayoutError> {
    let usable = i64::from(width) - 2 * i64::from(margin);
    if usable <= 0 {
        return Err(LayoutError::NoUsableWidth { width, margin });
    }

    let avg = font.average_letter_advance();
    if !avg.is_finite() {
        return Err(LayoutError::DegenerateMetrics);
    }

    let max_chars = (usable as f32 / avg.max(1.0)).floor() as usize;
    Ok(max_chars.max(1))
}

pub fn layout(
    quote: &str,
    author: &str,
    quote_font: &LoadedFont,
    author_font: &LoadedFont,
    size: CanvasSize,
    margin: u32,
) -> Result<LayoutResult, LayoutError> {
    let max_chars = max_chars_per_line(quote_font, size.width, margin)?;
    let quote_lines = wrap::fill_lines(&preprocess_quote(quote), max_chars);
    let author_text = author_caption(author);

    let line_spacing = quote_font.line_height();
    let quote_box = text::multiline_bbox(quote_font, &quote_lines, line_spacing);
    let author_box = text::line_bbox(author_font, &author_text);

    let (width, height) = (size.width as i32, size.height as i32);
    let margin = margin as i32;

    let total_height = quote_box.height() + author_box.height() + QUOTE_AUTHOR_GAP;
    let group_y = (height - total_height).div_euclid(2);
    let quote_origin = (margin, group_y);

    // Pinned to the bottom-right corner, independent of the centered group.
    let author_origin = (
        width - margin - author_box.width(),
        height - margin - author_box.height(),
    );

    debug!(
        max_chars,
        lines = quote_lines.len(),
        ?quote_origin,
        ?author_origin,
        "Layout computed"
    );

    Ok(LayoutResult {
        max_chars_per_line: max_chars,
        quote_lines,
        author_text,
        line_spacing,
        quote_box,
        author_box,
        quote_origin,
        author_origin,
    })
}

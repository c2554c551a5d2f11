//! End-to-end composition: base layers, layout, shadow, text, PNG.

use std::fmt;
use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use tracing::{debug, debug_span};

use crate::color::TextColor;
use crate::compose::compose_base;
use crate::error::{ColorField, CompositionError, FontLoadError};
use crate::font::{FontField, LoadedFont};
use crate::layout::layout;
use crate::render::render_text;
use crate::shadow::render_shadow;
use crate::{CanvasSize, DEFAULT_MARGIN};

pub const DEFAULT_QUOTE_FONT_SIZE: u32 = 48;
pub const DEFAULT_AUTHOR_FONT_SIZE: u32 = 40;
pub const DEFAULT_SHADOW_BLUR_RADIUS: u32 = 5;
pub const DEFAULT_TEXT_COLOR: &str = "white";

/// Largest font size a caller should ask for.
pub const MAX_FONT_SIZE: u32 = 1000;
/// Largest shadow blur radius a caller should ask for.
pub const MAX_SHADOW_BLUR_RADIUS: u32 = 100;

/// Font sizes are capped at this multiple of the canvas height.
const FONT_SIZE_CANVAS_FACTOR: u32 = 2;

/// Everything needed to render one card.
#[derive(Debug, Clone)]
pub struct CompositionRequest {
    pub quote: String,
    pub author: String,
    pub quote_font_size: u32,
    pub author_font_size: u32,
    pub quote_color: String,
    pub author_color: String,
    pub shadow_blur_radius: u32,
    pub background: Vec<u8>,
    pub overlay: Vec<u8>,
    pub quote_font: Vec<u8>,
    pub author_font: Vec<u8>,
}

impl CompositionRequest {
    /// A request with default sizes, white text and a blur radius of 5.
    pub fn new(
        quote: impl Into<String>,
        author: impl Into<String>,
        background: Vec<u8>,
        overlay: Vec<u8>,
        quote_font: Vec<u8>,
        author_font: Vec<u8>,
    ) -> Self {
        Self {
            quote: quote.into(),
            author: author.into(),
            quote_font_size: DEFAULT_QUOTE_FONT_SIZE,
            author_font_size: DEFAULT_AUTHOR_FONT_SIZE,
            quote_color: DEFAULT_TEXT_COLOR.to_string(),
            author_color: DEFAULT_TEXT_COLOR.to_string(),
            shadow_blur_radius: DEFAULT_SHADOW_BLUR_RADIUS,
            background,
            overlay,
            quote_font,
            author_font,
        }
    }
}

/// Canvas geometry shared by every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComposeOptions {
    pub canvas: CanvasSize,
    pub margin: u32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            canvas: CanvasSize::default(),
            margin: DEFAULT_MARGIN,
        }
    }
}

/// A font input that was replaced by the embedded fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositionWarning {
    pub field: FontField,
    pub reason: FontLoadError,
}

impl fmt::Display for CompositionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} fell back to the default font: {}", self.field, self.reason)
    }
}

#[derive(Debug, Clone)]
pub struct CompositionResult {
    pub image: RgbaImage,
    pub png: Vec<u8>,
    pub warnings: Vec<CompositionWarning>,
}

impl CompositionResult {
    pub fn is_degraded(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Compose with the default 512×512 canvas and 20px margin.
pub fn compose(request: &CompositionRequest) -> Result<CompositionResult, CompositionError> {
    compose_with(request, &ComposeOptions::default())
}

pub fn compose_with(
    request: &CompositionRequest,
    options: &ComposeOptions,
) -> Result<CompositionResult, CompositionError> {
    let span = debug_span!(
        "compose",
        width = options.canvas.width,
        height = options.canvas.height
    );
    let _guard = span.enter();

    let quote_color = parse_color(&request.quote_color, ColorField::Quote)?;
    let author_color = parse_color(&request.author_color, ColorField::Author)?;

    let base = compose_base(&request.background, &request.overlay, options.canvas)?;
    debug!("Base layers composed");

    let size_cap = font_size_cap(options.canvas);
    let quote_font = LoadedFont::load(
        request.quote_font.clone(),
        request.quote_font_size.min(size_cap),
        FontField::Quote,
    );
    let author_font = LoadedFont::load(
        request.author_font.clone(),
        request.author_font_size.min(size_cap),
        FontField::Author,
    );

    let layout = layout(
        &request.quote,
        &request.author,
        &quote_font,
        &author_font,
        options.canvas,
        options.margin,
    )?;

    let canvas = render_shadow(
        base,
        &layout,
        &quote_font,
        &author_font,
        request.shadow_blur_radius,
    );
    let image = render_text(
        canvas,
        &layout,
        &quote_font,
        &author_font,
        quote_color.rgba(),
        author_color.rgba(),
    );

    let png = encode_png(&image)?;
    debug!(bytes = png.len(), "Encoded PNG");

    let warnings = [(FontField::Quote, &quote_font), (FontField::Author, &author_font)]
        .into_iter()
        .filter_map(|(field, font)| {
            font.fallback_reason().map(|reason| CompositionWarning {
                field,
                reason: reason.clone(),
            })
        })
        .collect();

    Ok(CompositionResult {
        image,
        png,
        warnings,
    })
}

/// Glyphs taller than this only paint off-canvas and cost a rasterizer the
/// size of the glyph.
fn font_size_cap(canvas: CanvasSize) -> u32 {
    canvas.height.saturating_mul(FONT_SIZE_CANVAS_FACTOR).max(1)
}

fn parse_color(value: &str, field: ColorField) -> Result<TextColor, CompositionError> {
    TextColor::parse(value).map_err(|_| CompositionError::InvalidColor {
        field,
        value: value.to_string(),
    })
}

pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CompositionError> {
    let mut buf = Cursor::new(Vec::new());
    image
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(CompositionError::Encode)?;
    Ok(buf.into_inner())
}

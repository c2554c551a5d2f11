//! Font loading with an embedded fallback.
//!
//! A font that fails to parse never fails the request. The loader swaps in
//! the bundled DejaVu Sans at a small fixed size and records why, so callers
//! can log or report the degradation.

use std::fmt;

use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use tracing::{debug, warn};

use crate::error::FontLoadError;

/// Bundled fallback font (DejaVu Sans, see `assets/DejaVuSans-LICENSE.txt`).
pub const FALLBACK_FONT: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Em size the fallback font is rendered at, regardless of the requested size.
pub const FALLBACK_FONT_PX: f32 = 10.0;

/// Letters sampled for the average advance width.
pub const LATIN_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Which font input a [`LoadedFont`] was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontField {
    Quote,
    Author,
}

impl fmt::Display for FontField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => f.write_str("quote_font_file"),
            Self::Author => f.write_str("author_font_file"),
        }
    }
}

/// A parsed font bound to a pixel scale.
#[derive(Clone)]
pub struct LoadedFont {
    font: FontArc,
    scale: PxScale,
    fallback: Option<FontLoadError>,
}

impl LoadedFont {
    /// Parse `data` and bind it to an em size of `size_px`.
    ///
    /// Falls back to [`FALLBACK_FONT`] at [`FALLBACK_FONT_PX`] on failure.
    pub fn load(data: Vec<u8>, size_px: u32, field: FontField) -> Self {
        match parse_font(data) {
            Ok(font) => {
                let scale = em_scale(&font, size_px as f32);
                debug!(%field, size_px, scale = scale.y, "Font loaded");
                Self {
                    font,
                    scale,
                    fallback: None,
                }
            }
            Err(err) => {
                warn!(%field, error = %err, "Font failed to load, using embedded fallback");
                Self::fallback(err)
            }
        }
    }

    /// The embedded font, tagged with the reason it was substituted.
    pub fn fallback(reason: FontLoadError) -> Self {
        let font = FontArc::try_from_slice(FALLBACK_FONT)
            .expect("embedded fallback font must be a valid TTF");
        let scale = em_scale(&font, FALLBACK_FONT_PX);
        Self {
            font,
            scale,
            fallback: Some(reason),
        }
    }

    pub fn font(&self) -> &FontArc {
        &self.font
    }

    pub fn scale(&self) -> PxScale {
        self.scale
    }

    /// Why this font is the fallback, or `None` if the input loaded.
    pub fn fallback_reason(&self) -> Option<&FontLoadError> {
        self.fallback.as_ref()
    }

    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    /// Horizontal advance of a single character in pixels.
    pub fn advance(&self, ch: char) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.h_advance(scaled.glyph_id(ch))
    }

    /// Mean advance over the 52 Latin letters.
    pub fn average_letter_advance(&self) -> f32 {
        let total: f32 = LATIN_LETTERS.chars().map(|c| self.advance(c)).sum();
        total / LATIN_LETTERS.len() as f32
    }

    /// Natural distance between baselines.
    pub fn line_height(&self) -> i32 {
        let scaled = self.font.as_scaled(self.scale);
        (scaled.ascent() - scaled.descent() + scaled.line_gap()).ceil() as i32
    }
}

impl fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedFont")
            .field("scale", &self.scale)
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

fn parse_font(data: Vec<u8>) -> Result<FontArc, FontLoadError> {
    let font = FontArc::try_from_vec(data).map_err(|_| FontLoadError::Parse)?;
    if LATIN_LETTERS.chars().all(|c| font.glyph_id(c).0 == 0) {
        return Err(FontLoadError::MissingGlyphs);
    }
    Ok(font)
}

/// Convert an em size to ab_glyph's ascent-to-descent pixel scale.
fn em_scale(font: &FontArc, size_px: f32) -> PxScale {
    let size_px = size_px.max(1.0);
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size_px * font.height_unscaled() / upem),
        _ => PxScale::from(size_px),
    }
}

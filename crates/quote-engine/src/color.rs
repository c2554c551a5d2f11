//! Text color parsing.
//!
//! Accepts CSS colors (`white`, `#fafafa`, `rgb(10, 20, 30)`) plus bare
//! `r,g,b` / `r,g,b,a` triples, optionally wrapped in parentheses.

use std::str::FromStr;

use image::Rgba;

use crate::error::ColorParseError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor(pub Rgba<u8>);

impl TextColor {
    pub const WHITE: Self = Self(Rgba([255, 255, 255, 255]));

    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let trimmed = value.trim();
        if let Some(color) = parse_triple(trimmed) {
            return Ok(color);
        }

        let css = trimmed
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase()
            .parse::<css_color_parser::Color>()
            .map_err(|_| ColorParseError(value.to_string()))?;
        let alpha = (css.a.clamp(0.0, 1.0) * 255.0).round() as u8;
        Ok(Self(Rgba([css.r, css.g, css.b, alpha])))
    }

    pub fn rgba(self) -> Rgba<u8> {
        self.0
    }
}

impl Default for TextColor {
    fn default() -> Self {
        Self::WHITE
    }
}

impl FromStr for TextColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `r,g,b` or `r,g,b,a` with 0-255 components.
fn parse_triple(value: &str) -> Option<TextColor> {
    let inner = value
        .strip_prefix('(')
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);
    let parts: Vec<u8> = inner
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<Result<_, _>>()
        .ok()?;

    match parts.as_slice() {
        [r, g, b] => Some(TextColor(Rgba([*r, *g, *b, 255]))),
        [r, g, b, a] => Some(TextColor(Rgba([*r, *g, *b, *a]))),
        _ => None,
    }
}

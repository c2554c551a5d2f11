//! Error types for the composition pipeline.

use std::fmt;

/// Which raster input failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageField {
    Background,
    Overlay,
}

impl fmt::Display for ImageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background_image"),
            Self::Overlay => f.write_str("overlay_image"),
        }
    }
}

/// Which text color failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorField {
    Quote,
    Author,
}

impl fmt::Display for ColorField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote => f.write_str("quote_text_color"),
            Self::Author => f.write_str("author_text_color"),
        }
    }
}

/// Fatal errors. Any of these aborts the request without producing an image.
#[derive(Debug, thiserror::Error)]
pub enum CompositionError {
    #[error("failed to decode {field}: {source}")]
    ImageDecode {
        field: ImageField,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid color for {field}: {value:?}")]
    InvalidColor { field: ColorField, value: String },
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
    #[error("failed to encode PNG: {0}")]
    Encode(#[source] image::ImageError),
}

/// Recoverable font failure. The engine substitutes the embedded font.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FontLoadError {
    #[error("font data could not be parsed (TTF/OTF expected)")]
    Parse,
    #[error("font has no glyphs for Latin letters")]
    MissingGlyphs,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("canvas width {width} leaves no room inside a {margin}px margin")]
    NoUsableWidth { width: u32, margin: u32 },
    #[error("font reported non-finite advance widths")]
    DegenerateMetrics,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color {0:?}")]
pub struct ColorParseError(pub String);

//! Quote card composition engine.
//!
//! Renders a quote and its author over a background photo and translucent
//! overlay, with a blurred drop shadow under the text. The engine is a pure
//! function of its inputs: bytes in, RGBA raster and PNG out.
//!
//! Stages run strictly in order and each is usable on its own:
//! [`compose_base`] → [`layout()`] → [`render_shadow`] → [`render_text`].
//! [`compose()`] runs all of them.

pub mod color;
pub mod compose;
pub mod error;
pub mod font;
pub mod layout;
pub mod pipeline;
pub mod render;
pub mod shadow;
pub mod text;
pub mod wrap;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use color::TextColor;
pub use compose::compose_base;
pub use error::{ColorField, CompositionError, FontLoadError, ImageField, LayoutError};
pub use font::{FontField, LoadedFont};
pub use layout::{LayoutResult, layout};
pub use pipeline::{
    ComposeOptions, CompositionRequest, CompositionResult, CompositionWarning, compose,
    compose_with,
};
pub use render::render_text;
pub use shadow::render_shadow;
pub use text::TextBox;

/// Default canvas edge length in pixels.
pub const DEFAULT_CANVAS_SIZE: u32 = 512;

/// Default distance between text and the canvas edge.
pub const DEFAULT_MARGIN: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_SIZE, DEFAULT_CANVAS_SIZE)
    }
}

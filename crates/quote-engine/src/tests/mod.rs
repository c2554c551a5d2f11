use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};

use crate::font::{FALLBACK_FONT, FontField, LoadedFont};

/// The bundled font loaded as a regular (non-fallback) font.
pub(crate) fn test_font(size_px: u32) -> LoadedFont {
    LoadedFont::load(FALLBACK_FONT.to_vec(), size_px, FontField::Quote)
}

/// PNG bytes of a single-color image.
pub(crate) fn solid_png(width: u32, height: u32, color: Rgba<u8>) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, color);
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode test PNG");
    buf.into_inner()
}

/// A valid font whose character map has been hidden, so no letter maps to a
/// glyph.
pub(crate) fn font_without_letters() -> Vec<u8> {
    let mut data = FALLBACK_FONT.to_vec();
    let num_tables = usize::from(u16::from_be_bytes([data[4], data[5]]));
    let record = (0..num_tables)
        .map(|i| 12 + i * 16)
        .find(|&at| &data[at..at + 4] == b"cmap")
        .expect("bundled font has a cmap table");
    data[record..record + 4].copy_from_slice(b"cmaq");
    data
}

use image::Rgba;

/// Hook that writes one selected glyph into a row buffer.
///
/// Colorized output wraps each glyph in whatever escape sequences the target terminal
/// understands; that rendering lives outside this crate. Implementations must not emit line
/// terminators.
pub trait GlyphStyler: Send {
    /// Append `glyph`, chosen for pixel `px`, to `row`.
    fn push_glyph(&self, row: &mut String, glyph: &str, px: Rgba<u16>);
}

/// Writes glyphs unchanged.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainStyler;

impl GlyphStyler for PlainStyler {
    fn push_glyph(&self, row: &mut String, glyph: &str, _px: Rgba<u16>) {
        row.push_str(glyph);
    }
}

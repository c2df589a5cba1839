use image::Rgba;

use crate::foundation::core::CHANNEL_MAX;
use crate::glyph::palette::Palette;

/// Maps 16-bit RGB brightness to palette indices.
///
/// Brightness is the plain mean of the three channels over `[0, 65535]`, mapped onto
/// `[0, len - 1]` with floor rounding. Pure black selects index 0, pure white the last glyph,
/// and the index never decreases as brightness grows. Alpha is ignored.
#[derive(Clone, Debug)]
pub struct Quantizer {
    palette: Palette,
}

impl Quantizer {
    /// Create a quantizer over `palette`.
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }

    /// Borrow the palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Palette index for one RGB triple.
    pub fn index(&self, r: u16, g: u16, b: u16) -> usize {
        let steps = (self.palette.len() - 1) as u64;
        let sum = u64::from(r) + u64::from(g) + u64::from(b);
        // floor(mean / max * steps) without going through floats.
        let idx = sum * steps / (3 * u64::from(CHANNEL_MAX));
        (idx as usize).min(self.palette.len() - 1)
    }

    /// Palette index for a pixel.
    pub fn index_of(&self, px: Rgba<u16>) -> usize {
        self.index(px.0[0], px.0[1], px.0[2])
    }

    /// Glyph for one RGB triple.
    pub fn glyph(&self, r: u16, g: u16, b: u16) -> &str {
        self.palette.glyph(self.index(r, g, b))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/quantize.rs"]
mod tests;

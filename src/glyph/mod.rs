//! Brightness quantization into glyph palettes.

/// Ordered glyph palettes and presets.
pub mod palette;
/// Pixel to palette index mapping.
pub mod quantize;
/// Image to glyph rows.
pub mod render;
/// Per-glyph styling hook used by colorized output.
pub mod style;

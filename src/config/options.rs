use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::palette::Palette;

/// How selected glyphs are written.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Bare glyphs.
    #[default]
    Plain,
    /// Glyphs passed through a caller-supplied [`GlyphStyler`](crate::GlyphStyler).
    Colorized,
}

/// Options for turning images into glyph text.
///
/// Every field has a default, so JSON documents only need to name what they change:
///
/// ```
/// let opts = glyphcast::Options::from_json_str(r#"{ "resize": true, "width": 80 }"#).unwrap();
/// assert_eq!(opts.stride_h, 2.0);
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Glyphs from darkest (index 0) to brightest.
    pub palette: Palette,
    /// Plain or colorized glyph output.
    pub color_mode: ColorMode,

    /// Resize to `width`×`height`. A zero dimension is derived from the aspect ratio.
    pub resize: bool,
    /// With `resize`, fit inside `width`×`height` instead, never upscaling.
    pub thumbnail: bool,
    /// Target width for `resize`/`thumbnail`.
    pub width: u32,
    /// Target height for `resize`/`thumbnail`.
    pub height: u32,

    /// Horizontal glyph cell stride; output width is divided by it.
    pub stride_w: f64,
    /// Vertical glyph cell stride; output height is divided by it. Glyph cells are usually about
    /// twice as tall as they are wide, hence the default of 2.
    pub stride_h: f64,

    /// Crop before resizing instead of after.
    pub crop_first: bool,
    /// Pixels removed from the left edge.
    pub crop_left: u32,
    /// Pixels removed from the right edge.
    pub crop_right: u32,
    /// Pixels removed from the top edge.
    pub crop_top: u32,
    /// Pixels removed from the bottom edge.
    pub crop_bottom: u32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            color_mode: ColorMode::Plain,
            resize: false,
            thumbnail: false,
            width: 0,
            height: 0,
            stride_w: 1.0,
            stride_h: 2.0,
            crop_first: false,
            crop_left: 0,
            crop_right: 0,
            crop_top: 0,
            crop_bottom: 0,
        }
    }
}

impl Options {
    /// Parse and validate options from JSON.
    pub fn from_json_str(s: &str) -> GlyphResult<Self> {
        let opts: Options = serde_json::from_str(s)
            .map_err(|e| GlyphError::config(format!("invalid options json: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Read, parse and validate options from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> GlyphResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read options file '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check constraints that do not depend on the image being converted.
    ///
    /// Crop insets are checked against the actual image in the rasterizer.
    pub fn validate(&self) -> GlyphResult<()> {
        if self.palette.is_empty() {
            return Err(GlyphError::config("palette must contain at least one glyph"));
        }
        for (name, v) in [("stride_w", self.stride_w), ("stride_h", self.stride_h)] {
            if !v.is_finite() || v <= 0.0 {
                return Err(GlyphError::config(format!(
                    "{name} must be a positive finite number, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Return `true` when thumbnail/resize would change the image size.
    pub fn resize_enabled(&self) -> bool {
        self.resize && (self.width != 0 || self.height != 0)
    }

    /// Return `true` when stride compensation runs.
    pub fn stride_enabled(&self) -> bool {
        self.stride_w > 1.0 || self.stride_h > 1.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/options.rs"]
mod tests;

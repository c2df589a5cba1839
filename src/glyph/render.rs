use crate::config::options::{ColorMode, Options};
use crate::foundation::core::Rgba16Image;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::quantize::Quantizer;
use crate::glyph::style::{GlyphStyler, PlainStyler};
use crate::raster::transform::Rasterizer;

/// Row terminator of the glyph text format.
pub const LINE_END: &str = "\r\n";

/// Rasterizes an image and turns every pixel into a styled glyph, one row at a time.
pub struct GlyphRenderer {
    rasterizer: Rasterizer,
    quantizer: Quantizer,
    styler: Box<dyn GlyphStyler>,
    row: String,
}

impl std::fmt::Debug for GlyphRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphRenderer")
            .field("rasterizer", &self.rasterizer)
            .field("quantizer", &self.quantizer)
            .finish_non_exhaustive()
    }
}

impl GlyphRenderer {
    /// Create a plain renderer.
    ///
    /// [`ColorMode::Colorized`] needs a styler; use [`GlyphRenderer::with_styler`].
    pub fn new(opts: &Options) -> GlyphResult<Self> {
        if opts.color_mode == ColorMode::Colorized {
            return Err(GlyphError::config("colorized output requires a glyph styler"));
        }
        Self::build(opts, Box::new(PlainStyler))
    }

    /// Create a renderer that writes glyphs through `styler`.
    pub fn with_styler(opts: &Options, styler: impl GlyphStyler + 'static) -> GlyphResult<Self> {
        Self::build(opts, Box::new(styler))
    }

    fn build(opts: &Options, styler: Box<dyn GlyphStyler>) -> GlyphResult<Self> {
        Ok(Self {
            rasterizer: Rasterizer::new(opts)?,
            quantizer: Quantizer::new(opts.palette.clone()),
            styler,
            row: String::new(),
        })
    }

    /// Borrow the quantizer.
    pub fn quantizer(&self) -> &Quantizer {
        &self.quantizer
    }

    /// Rasterize `image` and hand each finished row (terminator included) to `emit`.
    ///
    /// Stops at the first error returned by `emit`.
    pub fn render_rows<F>(&mut self, image: &Rgba16Image, emit: F) -> GlyphResult<()>
    where
        F: FnMut(&str) -> GlyphResult<()>,
    {
        let img = self.rasterize(image)?;
        self.emit_rows(&img, emit)
    }

    /// Crop, resize and stride-scale `image` without producing any glyphs.
    pub(crate) fn rasterize(&self, image: &Rgba16Image) -> GlyphResult<Rgba16Image> {
        self.rasterizer.transform(image)
    }

    /// Quantize an already rasterized image row by row.
    pub(crate) fn emit_rows<F>(&mut self, img: &Rgba16Image, mut emit: F) -> GlyphResult<()>
    where
        F: FnMut(&str) -> GlyphResult<()>,
    {
        for y in 0..img.height() {
            self.row.clear();
            for x in 0..img.width() {
                let px = *img.get_pixel(x, y);
                let glyph = self.quantizer.palette().glyph(self.quantizer.index_of(px));
                self.styler.push_glyph(&mut self.row, glyph, px);
            }
            self.row.push_str(LINE_END);
            emit(&self.row)?;
        }
        Ok(())
    }

    /// Rasterize `image` into one string of terminated rows.
    pub fn render_text(&mut self, image: &Rgba16Image) -> GlyphResult<String> {
        let mut text = String::new();
        self.render_rows(image, |row| {
            text.push_str(row);
            Ok(())
        })?;
        Ok(text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/glyph/render.rs"]
mod tests;

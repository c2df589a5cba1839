use std::io::Write;

use crate::composite::compositor::Compositor;
use crate::config::options::Options;
use crate::foundation::core::Rgba16Image;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::render::{GlyphRenderer, LINE_END};
use crate::glyph::style::GlyphStyler;
use crate::source::animation::Animation;
use crate::stream::frame::TextFrame;

/// Writes images and animations to a byte sink in the glyph stream format.
///
/// Every write failure aborts the current call and is returned as-is; nothing is retried and a
/// partially written frame is left in the sink.
#[derive(Debug)]
pub struct StreamEncoder<W: Write> {
    sink: W,
    renderer: GlyphRenderer,
    frames_written: u64,
}

impl<W: Write> StreamEncoder<W> {
    /// Create an encoder with plain glyph output.
    pub fn new(sink: W, opts: &Options) -> GlyphResult<Self> {
        Ok(Self::from_renderer(sink, GlyphRenderer::new(opts)?))
    }

    /// Create an encoder that writes glyphs through `styler`.
    pub fn with_styler(
        sink: W,
        opts: &Options,
        styler: impl GlyphStyler + 'static,
    ) -> GlyphResult<Self> {
        Ok(Self::from_renderer(
            sink,
            GlyphRenderer::with_styler(opts, styler)?,
        ))
    }

    /// Wrap an existing renderer.
    pub fn from_renderer(sink: W, renderer: GlyphRenderer) -> Self {
        Self {
            sink,
            renderer,
            frames_written: 0,
        }
    }

    /// Number of delay-prefixed frames written so far.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Borrow the sink.
    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    /// Write a still image: rows only, no delay line, no frame boundary.
    pub fn encode_still(&mut self, image: &Rgba16Image) -> GlyphResult<()> {
        let sink = &mut self.sink;
        self.renderer.render_rows(image, |row| Ok(sink.write_all(row.as_bytes())?))
    }

    /// Write one animation frame: delay line, rows, frame boundary.
    ///
    /// The image is rasterized before anything is written, so a config error leaves the sink
    /// untouched.
    pub fn encode_frame(&mut self, delay: u32, image: &Rgba16Image) -> GlyphResult<()> {
        let img = self.renderer.rasterize(image)?;
        write!(self.sink, "{delay}{LINE_END}")?;
        let sink = &mut self.sink;
        self.renderer.emit_rows(&img, |row| Ok(sink.write_all(row.as_bytes())?))?;
        self.sink.write_all(LINE_END.as_bytes())?;
        self.frames_written += 1;
        Ok(())
    }

    /// Write an already rendered frame.
    ///
    /// `frame.text` must be empty or a sequence of non-blank rows each ending in a line
    /// terminator, otherwise the frame could not be read back and a format error is returned.
    pub fn write_text_frame(&mut self, frame: &TextFrame) -> GlyphResult<()> {
        if !frame.text.is_empty() && !frame.text.ends_with('\n') {
            return Err(GlyphError::format("frame text must end with a line terminator"));
        }
        if frame
            .text
            .split_inclusive('\n')
            .any(|line| line == "\n" || line == LINE_END)
        {
            return Err(GlyphError::format("frame text must not contain blank lines"));
        }
        write!(self.sink, "{}{LINE_END}", frame.delay)?;
        self.sink.write_all(frame.text.as_bytes())?;
        self.sink.write_all(LINE_END.as_bytes())?;
        self.frames_written += 1;
        Ok(())
    }

    /// Composite, rasterize and write every frame of `animation` in order.
    ///
    /// Returns the number of frames written.
    #[tracing::instrument(skip_all, fields(frames = animation.len()))]
    pub fn encode_animation(&mut self, animation: &Animation) -> GlyphResult<usize> {
        let mut n = 0;
        for (delay, snapshot) in Compositor::composite_all(animation) {
            self.encode_frame(delay, snapshot.image())?;
            n += 1;
        }
        tracing::debug!(frames = n, "encoded animation");
        Ok(n)
    }

    /// Flush the sink and return it.
    pub fn finish(mut self) -> GlyphResult<W> {
        self.sink.flush()?;
        Ok(self.sink)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stream/encoder.rs"]
mod tests;

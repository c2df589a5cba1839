//! One-call entry points wiring sources through compositing, rasterizing and the glyph stream.

use std::io::Write;
use std::thread::JoinHandle;

use image::DynamicImage;

use crate::config::options::Options;
use crate::foundation::error::{GlyphError, GlyphResult};
use crate::glyph::render::GlyphRenderer;
use crate::source::animation::Animation;
use crate::stream::channel::{ChannelReader, DEFAULT_CHANNEL_CAPACITY, byte_channel};
use crate::stream::decoder::StreamDecoder;
use crate::stream::encoder::StreamEncoder;
use crate::stream::frame::TextFrame;

/// Convert a still image to glyph text: terminated rows, no delay line, no frame boundary.
pub fn encode_image(image: &DynamicImage, opts: &Options) -> GlyphResult<String> {
    GlyphRenderer::new(opts)?.render_text(&image.to_rgba16())
}

/// Encode every frame of `animation` into `sink` and return the flushed sink.
pub fn encode_animation_to<W: Write>(
    animation: &Animation,
    opts: &Options,
    sink: W,
) -> GlyphResult<W> {
    let mut enc = StreamEncoder::new(sink, opts)?;
    enc.encode_animation(animation)?;
    enc.finish()
}

/// Controls for [`stream_animation_with`].
#[derive(Clone, Copy, Debug)]
pub struct StreamOpts {
    /// Bytes the in-memory channel holds before the encoder blocks.
    pub channel_capacity: usize,
}

impl Default for StreamOpts {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

/// Encode `animation` on a worker thread and decode it on the caller's side as it is produced.
///
/// Options are validated before the worker starts, so config errors are returned here.
pub fn stream_animation(animation: Animation, opts: &Options) -> GlyphResult<AnimationStream> {
    stream_animation_with(animation, GlyphRenderer::new(opts)?, StreamOpts::default())
}

/// [`stream_animation`] with an explicit renderer and channel settings.
#[tracing::instrument(skip_all, fields(frames = animation.len(), capacity = opts.channel_capacity))]
pub fn stream_animation_with(
    animation: Animation,
    renderer: GlyphRenderer,
    opts: StreamOpts,
) -> GlyphResult<AnimationStream> {
    let (tx, rx) = byte_channel(opts.channel_capacity);
    let producer = std::thread::Builder::new()
        .name("glyphcast-encoder".to_string())
        .spawn(move || -> GlyphResult<usize> {
            let mut enc = StreamEncoder::from_renderer(tx, renderer);
            let n = enc.encode_animation(&animation)?;
            enc.finish()?;
            Ok(n)
        })?;

    Ok(AnimationStream {
        decoder: Some(StreamDecoder::new(rx)),
        producer: Some(producer),
    })
}

/// Consumer side of [`stream_animation`]: frames in production order.
///
/// When the producer fails mid-frame the decoder reports a truncated frame; [`finish`] returns
/// the producer's own error.
///
/// [`finish`]: AnimationStream::finish
#[derive(Debug)]
pub struct AnimationStream {
    decoder: Option<StreamDecoder<ChannelReader>>,
    producer: Option<JoinHandle<GlyphResult<usize>>>,
}

impl AnimationStream {
    /// Block until the next frame is available.
    ///
    /// `Ok(None)` once the producer has finished and every frame was read.
    pub fn next_frame(&mut self) -> GlyphResult<Option<TextFrame>> {
        match self.decoder.as_mut() {
            Some(decoder) => decoder.next_frame(),
            None => Ok(None),
        }
    }

    /// Read all remaining frames, then join the producer.
    pub fn collect_frames(mut self) -> GlyphResult<Vec<TextFrame>> {
        let frames = match self.decoder.as_mut() {
            Some(decoder) => decoder.decode_all(),
            None => Ok(Vec::new()),
        };
        // A producer error explains a truncated stream better than the decoder's.
        self.join_producer()?;
        frames
    }

    /// Close the channel and join the producer, returning the number of frames it wrote.
    ///
    /// Calling this before every frame is read stops the producer, which then reports a broken
    /// pipe.
    pub fn finish(mut self) -> GlyphResult<usize> {
        self.join_producer()
    }

    fn join_producer(&mut self) -> GlyphResult<usize> {
        // Dropping the reader unblocks a producer waiting on a full channel.
        self.decoder = None;
        let Some(handle) = self.producer.take() else {
            return Ok(0);
        };
        handle
            .join()
            .map_err(|_| GlyphError::Other(anyhow::anyhow!("encoder thread panicked")))?
    }
}

impl Iterator for AnimationStream {
    type Item = GlyphResult<TextFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

impl Drop for AnimationStream {
    fn drop(&mut self) {
        let _ = self.join_producer();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/mod.rs"]
mod tests;

//! glyphcast turns still and animated raster images into terminal glyph text and reads that text
//! back as timed frames.
//!
//! # Pipeline overview
//!
//! 1. **Source**: a decoded [`Animation`] (from `image` for stills, [`decode_gif`] for GIFs)
//! 2. **Composite**: [`Compositor`] applies each frame and its [`DisposalMethod`] to a
//!    persistent canvas and hands out read-only [`CanvasSnapshot`]s
//! 3. **Rasterize**: [`Rasterizer`] crops, resizes and stride-scales each snapshot
//! 4. **Quantize**: [`Quantizer`] maps every pixel's mean brightness to a [`Palette`] glyph
//! 5. **Encode**: [`StreamEncoder`] writes the line-oriented glyph stream
//! 6. **Decode**: [`StreamDecoder`] pulls `(delay, text)` frames back out, one at a time
//!
//! [`stream_animation`] runs steps 2–5 on a worker thread connected to step 6 by a bounded
//! [`byte_channel`].
//!
//! ```
//! use glyphcast::{Options, Palette, encode_image};
//!
//! let img = image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
//!     4,
//!     2,
//!     image::Rgba([255, 255, 255, 255]),
//! ));
//! let opts = Options {
//!     palette: Palette::from_chars(" #").unwrap(),
//!     stride_h: 1.0,
//!     ..Options::default()
//! };
//! assert_eq!(encode_image(&img, &opts).unwrap(), "####\r\n####\r\n");
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Frame compositing.
pub mod composite;
/// Conversion options.
pub mod config;
/// Palettes, quantization and glyph rows.
pub mod glyph;
/// End-to-end entry points.
pub mod pipeline;
/// Crop/resize/stride geometry.
pub mod raster;
/// Decoded raster sources.
pub mod source;
/// Glyph stream protocol.
pub mod stream;

pub use crate::foundation::core::{
    CHANNEL_MAX, FrameRect, Rgba16Image, TRANSPARENT, rgba16_from_rgba8, widen_u8,
};
pub use crate::foundation::error::{GlyphError, GlyphResult};

pub use crate::composite::compositor::{CanvasSnapshot, CompositeFrames, Compositor};
pub use crate::config::options::{ColorMode, Options};
pub use crate::glyph::palette::Palette;
pub use crate::glyph::quantize::Quantizer;
pub use crate::glyph::render::{GlyphRenderer, LINE_END};
pub use crate::glyph::style::{GlyphStyler, PlainStyler};
pub use crate::pipeline::{
    AnimationStream, StreamOpts, encode_animation_to, encode_image, stream_animation,
    stream_animation_with,
};
pub use crate::raster::transform::{MAX_STRIDE_DIMENSION, RasterPlan, RasterStep, Rasterizer};
pub use crate::source::animation::{Animation, DisposalMethod, SourceFrame};
pub use crate::source::gif::decode_gif;
pub use crate::stream::channel::{
    ChannelReader, ChannelWriter, DEFAULT_CHANNEL_CAPACITY, byte_channel,
};
pub use crate::stream::decoder::StreamDecoder;
pub use crate::stream::encoder::StreamEncoder;
pub use crate::stream::frame::TextFrame;

use std::io::Read;

use anyhow::Context;
use image::Rgba;

use crate::foundation::core::{Rgba16Image, rgba16_from_rgba8, widen_u8};
use crate::foundation::error::GlyphResult;
use crate::source::animation::{Animation, DisposalMethod, SourceFrame};

/// Decode every frame of a GIF into an [`Animation`] without compositing.
///
/// Frames keep their own rectangles, disposal and delay; compositing is left to
/// [`Compositor`](crate::Compositor). The background color resolves through the global palette
/// when the file declares one.
#[tracing::instrument(skip(reader))]
pub fn decode_gif<R: Read>(reader: R) -> GlyphResult<Animation> {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::RGBA);
    let mut decoder = opts.read_info(reader).context("read gif header")?;

    let width = u32::from(decoder.width());
    let height = u32::from(decoder.height());
    let background = match (decoder.bg_color(), decoder.global_palette()) {
        (Some(idx), Some(palette)) => palette_color(palette, idx),
        _ => None,
    };

    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().context("read gif frame")? {
        let w = u32::from(frame.width);
        let h = u32::from(frame.height);
        let image = rgba8_to_rgba16(w, h, &frame.buffer)?;
        frames.push(SourceFrame::new(
            image,
            i32::from(frame.left),
            i32::from(frame.top),
            disposal_from_gif(frame.dispose),
            u32::from(frame.delay),
        ));
    }
    tracing::debug!(frames = frames.len(), width, height, "decoded gif");

    let mut anim = Animation::new(width, height, frames);
    anim.background = background;
    Ok(anim)
}

fn disposal_from_gif(dispose: gif::DisposalMethod) -> DisposalMethod {
    match dispose {
        gif::DisposalMethod::Keep => DisposalMethod::None,
        gif::DisposalMethod::Background => DisposalMethod::Background,
        gif::DisposalMethod::Previous => DisposalMethod::RestorePrevious,
        gif::DisposalMethod::Any => DisposalMethod::Unspecified,
    }
}

fn palette_color(palette: &[u8], idx: usize) -> Option<Rgba<u16>> {
    let rgb = palette.get(idx * 3..idx * 3 + 3)?;
    Some(Rgba([
        widen_u8(rgb[0]),
        widen_u8(rgb[1]),
        widen_u8(rgb[2]),
        u16::MAX,
    ]))
}

fn rgba8_to_rgba16(width: u32, height: u32, buffer: &[u8]) -> GlyphResult<Rgba16Image> {
    let expected = (width as usize) * (height as usize) * 4;
    if buffer.len() < expected {
        return Err(anyhow::anyhow!(
            "gif frame buffer too small: expected {expected} bytes, got {}",
            buffer.len()
        )
        .into());
    }
    Ok(Rgba16Image::from_fn(width, height, |x, y| {
        let i = ((y as usize) * (width as usize) + (x as usize)) * 4;
        rgba16_from_rgba8([buffer[i], buffer[i + 1], buffer[i + 2], buffer[i + 3]])
    }))
}

#[cfg(test)]
#[path = "../../tests/unit/source/gif.rs"]
mod tests;

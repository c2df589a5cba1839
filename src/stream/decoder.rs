use std::io::BufRead;

use crate::foundation::error::{GlyphError, GlyphResult};
use crate::stream::frame::TextFrame;

/// Pull-based reader of the glyph stream format.
///
/// Holds nothing between calls except the read cursor of its source, so it works over
/// unbounded streams in a single pass. Both `\r\n` and bare `\n` terminate lines.
#[derive(Debug)]
pub struct StreamDecoder<R: BufRead> {
    source: R,
    line: Vec<u8>,
    frames_read: u64,
}

impl<R: BufRead> StreamDecoder<R> {
    /// Create a decoder over `source`.
    pub fn new(source: R) -> Self {
        Self {
            source,
            line: Vec::new(),
            frames_read: 0,
        }
    }

    /// Number of frames returned so far.
    pub fn frames_read(&self) -> u64 {
        self.frames_read
    }

    /// Read the next frame.
    ///
    /// Returns `Ok(None)` when the source ends where a delay line would start. A source that ends
    /// anywhere inside a frame, including right after its delay line, is a truncated frame and
    /// yields a format error.
    pub fn next_frame(&mut self) -> GlyphResult<Option<TextFrame>> {
        if !self.read_line()? {
            return Ok(None);
        }
        let delay = parse_delay(&self.line, self.frames_read)?;

        let mut text = String::new();
        loop {
            if !self.read_line()? {
                return Err(GlyphError::format(format!(
                    "frame {} truncated: stream ended before the frame boundary",
                    self.frames_read
                )));
            }
            if !self.line.ends_with(b"\n") {
                return Err(GlyphError::format(format!(
                    "frame {} truncated: last row has no line terminator",
                    self.frames_read
                )));
            }
            if is_blank(&self.line) {
                break;
            }
            let row = std::str::from_utf8(&self.line).map_err(|e| {
                GlyphError::format(format!("frame {} is not valid utf-8: {e}", self.frames_read))
            })?;
            text.push_str(row);
        }

        self.frames_read += 1;
        tracing::debug!(frame = self.frames_read - 1, delay, "decoded frame");
        Ok(Some(TextFrame { delay, text }))
    }

    /// Read every remaining frame, stopping at the first error.
    pub fn decode_all(&mut self) -> GlyphResult<Vec<TextFrame>> {
        let mut frames = Vec::new();
        while let Some(frame) = self.next_frame()? {
            frames.push(frame);
        }
        Ok(frames)
    }

    /// Return the source.
    pub fn into_inner(self) -> R {
        self.source
    }

    // Returns `false` at end of input.
    fn read_line(&mut self) -> GlyphResult<bool> {
        self.line.clear();
        let n = self.source.read_until(b'\n', &mut self.line)?;
        Ok(n > 0)
    }
}

impl<R: BufRead> Iterator for StreamDecoder<R> {
    type Item = GlyphResult<TextFrame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_frame().transpose()
    }
}

fn is_blank(line: &[u8]) -> bool {
    line == b"\r\n" || line == b"\n"
}

fn parse_delay(line: &[u8], frame: u64) -> GlyphResult<u32> {
    let trimmed = line
        .strip_suffix(b"\n")
        .map(|l| l.strip_suffix(b"\r").unwrap_or(l))
        .unwrap_or(line);
    std::str::from_utf8(trimmed)
        .ok()
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<u32>().ok())
        .ok_or_else(|| {
            GlyphError::format(format!(
                "frame {frame}: expected a decimal delay line, got {:?}",
                String::from_utf8_lossy(trimmed)
            ))
        })
}

#[cfg(test)]
#[path = "../../tests/unit/stream/decoder.rs"]
mod tests;

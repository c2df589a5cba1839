use image::{ImageBuffer, Rgba};

/// RGBA image with 16-bit channels, row-major.
///
/// This is the working precision of every canvas and snapshot in glyphcast.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// Largest value of a 16-bit channel.
pub const CHANNEL_MAX: u16 = u16::MAX;

/// Fully transparent black.
pub const TRANSPARENT: Rgba<u16> = Rgba([0, 0, 0, 0]);

/// Widen an 8-bit channel to 16 bits so that `0xff` maps to `0xffff`.
pub fn widen_u8(c: u8) -> u16 {
    u16::from(c) * 257
}

/// Widen a straight-alpha RGBA8 color.
pub fn rgba16_from_rgba8(px: [u8; 4]) -> Rgba<u16> {
    Rgba([
        widen_u8(px[0]),
        widen_u8(px[1]),
        widen_u8(px[2]),
        widen_u8(px[3]),
    ])
}

/// Integer rectangle in canvas coordinate space.
///
/// `x`/`y` are signed so frames placed left of or above the logical screen origin can still be
/// represented before the canvas origin is normalized.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FrameRect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameRect {
    /// Create a rectangle from its origin and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle anchored at `(0, 0)`.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Exclusive right edge.
    pub fn right(self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(self, other: FrameRect) -> FrameRect {
        let x0 = i64::from(self.x).min(i64::from(other.x));
        let y0 = i64::from(self.y).min(i64::from(other.y));
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        FrameRect {
            x: x0 as i32,
            y: y0 as i32,
            width: (x1 - x0).clamp(0, i64::from(u32::MAX)) as u32,
            height: (y1 - y0).clamp(0, i64::from(u32::MAX)) as u32,
        }
    }

    /// Translate by `(-dx, -dy)`.
    pub fn offset_by(self, dx: i32, dy: i32) -> FrameRect {
        FrameRect {
            x: self.x.saturating_sub(dx),
            y: self.y.saturating_sub(dy),
            ..self
        }
    }

    /// Clip against a `width`×`height` surface anchored at the origin.
    ///
    /// Returns pixel ranges `(x0, y0, x1, y1)` (exclusive ends), or `None` when nothing overlaps.
    pub fn clip_to(self, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        let x0 = i64::from(self.x).clamp(0, i64::from(width));
        let y0 = i64::from(self.y).clamp(0, i64::from(height));
        let x1 = self.right().clamp(0, i64::from(width));
        let y1 = self.bottom().clamp(0, i64::from(height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

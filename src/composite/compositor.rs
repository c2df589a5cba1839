use std::sync::Arc;

use image::Rgba;

use crate::foundation::core::{FrameRect, Rgba16Image, TRANSPARENT};
use crate::source::animation::{Animation, DisposalMethod, SourceFrame};

/// Read-only composited canvas state produced after drawing one frame.
///
/// Cheap to clone; the pixels are shared.
#[derive(Clone, Debug)]
pub struct CanvasSnapshot {
    image: Arc<Rgba16Image>,
}

impl CanvasSnapshot {
    /// Borrow the composited pixels.
    pub fn image(&self) -> &Rgba16Image {
        &self.image
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Owns the canvas of one animation and applies frames to it in order.
///
/// Frame bounds are given in source coordinates; `origin` is the canvas' top-left corner in that
/// space (the union of all frame bounds may start left of or above `(0, 0)`).
#[derive(Debug)]
pub struct Compositor {
    canvas: Rgba16Image,
    // Canvas state at the most recent `DisposalMethod::None` frame.
    last_kept: Option<Rgba16Image>,
    origin: (i32, i32),
    background: Rgba<u16>,
}

impl Compositor {
    /// Create a transparent `width`×`height` canvas anchored at the origin.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            canvas: Rgba16Image::from_pixel(width, height, TRANSPARENT),
            last_kept: None,
            origin: (0, 0),
            background: TRANSPARENT,
        }
    }

    /// Create a compositor sized to `animation.canvas_rect()` using its background color.
    pub fn for_animation(animation: &Animation) -> Self {
        let rect = animation.canvas_rect();
        let mut compositor = Self::new(rect.width, rect.height)
            .with_background(animation.background.unwrap_or(TRANSPARENT));
        compositor.origin = (rect.x, rect.y);
        compositor
    }

    /// Set the color background-style disposal fills with.
    pub fn with_background(mut self, background: Rgba<u16>) -> Self {
        self.background = background;
        self
    }

    /// Borrow the current (post-disposal) canvas.
    pub fn canvas(&self) -> &Rgba16Image {
        &self.canvas
    }

    /// Borrow the cached "last no-dispose" canvas, if any frame has produced one yet.
    pub fn last_kept(&self) -> Option<&Rgba16Image> {
        self.last_kept.as_ref()
    }

    /// Draw `frame`, snapshot the result, then apply the frame's disposal.
    ///
    /// `next_bounds` is the following frame's declared rectangle; it is only consulted by
    /// [`DisposalMethod::Unspecified`].
    pub fn render(
        &mut self,
        frame: &SourceFrame,
        next_bounds: Option<FrameRect>,
    ) -> CanvasSnapshot {
        self.draw(frame);
        let snapshot = CanvasSnapshot {
            image: Arc::new(self.canvas.clone()),
        };
        self.dispose(frame, next_bounds);
        snapshot
    }

    /// Composite every frame of `animation` in order, yielding `(delay, snapshot)` pairs.
    pub fn composite_all(animation: &Animation) -> CompositeFrames<'_> {
        CompositeFrames {
            compositor: Self::for_animation(animation),
            frames: &animation.frames,
            next: 0,
        }
    }

    fn draw(&mut self, frame: &SourceFrame) {
        let bounds = self.to_canvas(frame.bounds);
        let Some((x0, y0, x1, y1)) = bounds.clip_to(self.canvas.width(), self.canvas.height())
        else {
            return;
        };
        // Offset of the clipped region inside the frame's local pixels.
        let sx = (i64::from(x0) - i64::from(bounds.x)) as u32;
        let sy = (i64::from(y0) - i64::from(bounds.y)) as u32;
        for y in y0..y1 {
            for x in x0..x1 {
                let (lx, ly) = (x - x0 + sx, y - y0 + sy);
                if lx >= frame.image.width() || ly >= frame.image.height() {
                    continue;
                }
                let src = *frame.image.get_pixel(lx, ly);
                if src.0[3] != 0 {
                    self.canvas.put_pixel(x, y, src);
                }
            }
        }
    }

    fn dispose(&mut self, frame: &SourceFrame, next_bounds: Option<FrameRect>) {
        tracing::trace!(disposal = ?frame.disposal, "apply disposal");
        match frame.disposal {
            DisposalMethod::None => match self.last_kept.as_mut() {
                Some(kept) => kept.copy_from_slice(&self.canvas),
                None => self.last_kept = Some(self.canvas.clone()),
            },
            DisposalMethod::Background => self.fill(frame.bounds),
            DisposalMethod::RestorePrevious => {
                if let Some(kept) = self.last_kept.as_ref() {
                    self.canvas.copy_from_slice(kept);
                }
            }
            DisposalMethod::Unspecified => {
                if let Some(next) = next_bounds {
                    self.fill(next);
                }
            }
        }
    }

    fn fill(&mut self, rect: FrameRect) {
        let rect = self.to_canvas(rect);
        let Some((x0, y0, x1, y1)) = rect.clip_to(self.canvas.width(), self.canvas.height())
        else {
            return;
        };
        for y in y0..y1 {
            for x in x0..x1 {
                self.canvas.put_pixel(x, y, self.background);
            }
        }
    }

    fn to_canvas(&self, rect: FrameRect) -> FrameRect {
        rect.offset_by(self.origin.0, self.origin.1)
    }
}

/// Iterator returned by [`Compositor::composite_all`].
pub struct CompositeFrames<'a> {
    compositor: Compositor,
    frames: &'a [SourceFrame],
    next: usize,
}

impl CompositeFrames<'_> {
    /// Borrow the underlying compositor.
    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }
}

impl Iterator for CompositeFrames<'_> {
    type Item = (u32, CanvasSnapshot);

    fn next(&mut self) -> Option<Self::Item> {
        let frame = self.frames.get(self.next)?;
        let next_bounds = self.frames.get(self.next + 1).map(|f| f.bounds);
        self.next += 1;
        let snapshot = self.compositor.render(frame, next_bounds);
        tracing::debug!(
            frame = self.next - 1,
            delay = frame.delay,
            disposal = ?frame.disposal,
            "composited frame"
        );
        Some((frame.delay, snapshot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.frames.len().saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for CompositeFrames<'_> {}

#[cfg(test)]
#[path = "../../tests/unit/composite/compositor.rs"]
mod tests;

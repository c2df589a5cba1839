use crate::foundation::core::{FrameRect, Rgba16Image};
use image::{DynamicImage, Rgba};

/// Post-render instruction for the region a frame covered.
///
/// Applied after the frame has been composited and snapshotted, to prepare the canvas for the
/// next frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisposalMethod {
    /// Keep the canvas and remember it as the "last no-dispose" state.
    None,
    /// Fill the frame's bounds with the background color.
    Background,
    /// Restore the last "no-dispose" state.
    RestorePrevious,
    /// No instruction given; clear the next frame's bounds.
    #[default]
    Unspecified,
}

/// One decoded animation frame.
#[derive(Clone, Debug)]
pub struct SourceFrame {
    /// Local pixels, `bounds.width`×`bounds.height`.
    pub image: Rgba16Image,
    /// Placement in canvas coordinates. Width and height always match `image`.
    pub bounds: FrameRect,
    /// Disposal applied after this frame is rendered.
    pub disposal: DisposalMethod,
    /// Display time in units of 10 ms.
    pub delay: u32,
}

impl SourceFrame {
    /// Create a frame placed at `(x, y)`.
    pub fn new(image: Rgba16Image, x: i32, y: i32, disposal: DisposalMethod, delay: u32) -> Self {
        let bounds = FrameRect::new(x, y, image.width(), image.height());
        Self {
            image,
            bounds,
            disposal,
            delay,
        }
    }

    /// Wrap a decoded still image as a single frame at the origin.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self::new(image.to_rgba16(), 0, 0, DisposalMethod::None, 0)
    }
}

/// A decoded animation: logical screen, background, and frames in display order.
#[derive(Clone, Debug)]
pub struct Animation {
    /// Logical screen width declared by the source.
    pub width: u32,
    /// Logical screen height declared by the source.
    pub height: u32,
    /// Background color used by background-style disposal, when the source declares one.
    pub background: Option<Rgba<u16>>,
    /// Frames in display order.
    pub frames: Vec<SourceFrame>,
}

impl Animation {
    /// Create an animation with no declared background.
    pub fn new(width: u32, height: u32, frames: Vec<SourceFrame>) -> Self {
        Self {
            width,
            height,
            background: None,
            frames,
        }
    }

    /// Single-frame animation from a decoded still image.
    pub fn still(image: &DynamicImage) -> Self {
        let frame = SourceFrame::from_dynamic(image);
        Self::new(frame.image.width(), frame.image.height(), vec![frame])
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Rgba<u16>) -> Self {
        self.background = Some(background);
        self
    }

    /// Canvas rectangle: the union of every frame's bounds together with the origin.
    ///
    /// An animation without frames yields an empty rectangle at the origin.
    pub fn canvas_rect(&self) -> FrameRect {
        self.frames
            .iter()
            .map(|f| f.bounds)
            .fold(FrameRect::from_size(0, 0), FrameRect::union)
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Return `true` when there are no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/animation.rs"]
mod tests;

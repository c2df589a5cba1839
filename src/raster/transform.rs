use image::imageops::{self, FilterType};

use crate::config::options::Options;
use crate::foundation::core::Rgba16Image;
use crate::foundation::error::{GlyphError, GlyphResult};

const FILTER: FilterType = FilterType::Lanczos3;

/// Largest axis a stride below 1 may stretch an image to.
pub const MAX_STRIDE_DIMENSION: u32 = 1 << 16;

/// One geometric step of a [`RasterPlan`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RasterStep {
    /// Keep the `width`×`height` region at `(x, y)`.
    Crop {
        /// Left edge of the kept region.
        x: u32,
        /// Top edge of the kept region.
        y: u32,
        /// Kept width.
        width: u32,
        /// Kept height.
        height: u32,
    },
    /// Resample to `width`×`height` (resize or thumbnail).
    Resize {
        /// Output width.
        width: u32,
        /// Output height.
        height: u32,
    },
    /// Resample to compensate for glyph cell aspect ratio.
    Stride {
        /// Output width.
        width: u32,
        /// Output height.
        height: u32,
    },
}

impl RasterStep {
    /// Dimensions after this step.
    pub fn output_size(self) -> (u32, u32) {
        match self {
            RasterStep::Crop { width, height, .. }
            | RasterStep::Resize { width, height }
            | RasterStep::Stride { width, height } => (width, height),
        }
    }
}

/// Ordered geometry for one input size, computed without touching pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterPlan {
    /// Input dimensions.
    pub source: (u32, u32),
    /// Steps in execution order. Steps that would not change the size are omitted.
    pub steps: Vec<RasterStep>,
}

impl RasterPlan {
    /// Final output dimensions.
    pub fn output_size(&self) -> (u32, u32) {
        self.steps
            .last()
            .map(|s| s.output_size())
            .unwrap_or(self.source)
    }

    /// Dimensions right before stride compensation.
    pub fn pre_stride_size(&self) -> (u32, u32) {
        self.steps
            .iter()
            .rev()
            .find(|s| !matches!(s, RasterStep::Stride { .. }))
            .map(|s| s.output_size())
            .unwrap_or(self.source)
    }
}

/// Applies the crop/resize/stride geometry of [`Options`] to composited images.
#[derive(Clone, Debug)]
pub struct Rasterizer {
    opts: Options,
}

impl Rasterizer {
    /// Validate `opts` and create a rasterizer.
    pub fn new(opts: &Options) -> GlyphResult<Self> {
        opts.validate()?;
        Ok(Self { opts: opts.clone() })
    }

    /// Compute the steps for a `width`×`height` input.
    ///
    /// An empty input gets no steps. Fails with a config error when cropping leaves no pixels or
    /// a stride below 1 would grow an axis past [`MAX_STRIDE_DIMENSION`].
    pub fn plan(&self, width: u32, height: u32) -> GlyphResult<RasterPlan> {
        let mut plan = RasterPlan {
            source: (width, height),
            steps: Vec::with_capacity(3),
        };
        if width == 0 || height == 0 {
            return Ok(plan);
        }
        let mut size = (width, height);

        if self.opts.crop_first {
            size = self.push_crop(&mut plan, size)?;
            size = self.push_resize(&mut plan, size);
        } else {
            size = self.push_resize(&mut plan, size);
            size = self.push_crop(&mut plan, size)?;
        }

        if self.opts.stride_enabled() {
            let w = stride_dim(size.0, self.opts.stride_w, "stride_w")?;
            let h = stride_dim(size.1, self.opts.stride_h, "stride_h")?;
            if (w, h) != size {
                plan.steps.push(RasterStep::Stride {
                    width: w,
                    height: h,
                });
            }
        }
        Ok(plan)
    }

    /// Crop, resize and stride-scale `image`.
    pub fn transform(&self, image: &Rgba16Image) -> GlyphResult<Rgba16Image> {
        let plan = self.plan(image.width(), image.height())?;
        let mut out: Option<Rgba16Image> = None;
        for step in &plan.steps {
            let cur = out.as_ref().unwrap_or(image);
            out = Some(match *step {
                RasterStep::Crop {
                    x,
                    y,
                    width,
                    height,
                } => imageops::crop_imm(cur, x, y, width, height).to_image(),
                RasterStep::Resize { width, height } | RasterStep::Stride { width, height } => {
                    imageops::resize(cur, width, height, FILTER)
                }
            });
        }
        Ok(out.unwrap_or_else(|| image.clone()))
    }

    fn push_crop(&self, plan: &mut RasterPlan, (w, h): (u32, u32)) -> GlyphResult<(u32, u32)> {
        let o = &self.opts;
        if o.crop_left == 0 && o.crop_right == 0 && o.crop_top == 0 && o.crop_bottom == 0 {
            return Ok((w, h));
        }
        let cw = w.saturating_sub(o.crop_left.saturating_add(o.crop_right));
        let ch = h.saturating_sub(o.crop_top.saturating_add(o.crop_bottom));
        if cw == 0 || ch == 0 {
            return Err(GlyphError::config(format!(
                "crop insets (left {}, top {}, right {}, bottom {}) leave nothing of a {w}x{h} image",
                o.crop_left, o.crop_top, o.crop_right, o.crop_bottom
            )));
        }
        plan.steps.push(RasterStep::Crop {
            x: o.crop_left,
            y: o.crop_top,
            width: cw,
            height: ch,
        });
        Ok((cw, ch))
    }

    fn push_resize(&self, plan: &mut RasterPlan, size: (u32, u32)) -> (u32, u32) {
        if !self.opts.resize_enabled() {
            return size;
        }
        let target = if self.opts.thumbnail {
            thumbnail_size(size, self.opts.width, self.opts.height)
        } else {
            resize_size(size, self.opts.width, self.opts.height)
        };
        if target != size {
            plan.steps.push(RasterStep::Resize {
                width: target.0,
                height: target.1,
            });
        }
        target
    }
}

/// `v / stride`, floored, at least 1. Growing past `max(v, MAX_STRIDE_DIMENSION)` is rejected.
fn stride_dim(v: u32, stride: f64, name: &str) -> GlyphResult<u32> {
    let scaled = (f64::from(v) / stride).floor();
    let limit = v.max(MAX_STRIDE_DIMENSION);
    if scaled > f64::from(limit) {
        return Err(GlyphError::config(format!(
            "{name} {stride} stretches {v} pixels past the {limit} pixel limit"
        )));
    }
    Ok((scaled as u32).max(1))
}

/// Exact resize target; a zero dimension follows the aspect ratio.
fn resize_size((w, h): (u32, u32), tw: u32, th: u32) -> (u32, u32) {
    match (tw, th) {
        (0, 0) => (w, h),
        (0, th) => (scale_dim(w, th, h), th),
        (tw, 0) => (tw, scale_dim(h, tw, w)),
        (tw, th) => (tw, th),
    }
}

/// Largest size fitting in `max_w`×`max_h` with the same aspect ratio, never larger than the
/// input. A zero bound leaves that axis unconstrained.
fn thumbnail_size((w, h): (u32, u32), max_w: u32, max_h: u32) -> (u32, u32) {
    let fits_w = max_w == 0 || w <= max_w;
    let fits_h = max_h == 0 || h <= max_h;
    if fits_w && fits_h {
        return (w, h);
    }
    let sx = if max_w == 0 {
        f64::INFINITY
    } else {
        f64::from(max_w) / f64::from(w)
    };
    let sy = if max_h == 0 {
        f64::INFINITY
    } else {
        f64::from(max_h) / f64::from(h)
    };
    if sx <= sy {
        (max_w, scale_dim(h, max_w, w))
    } else {
        (scale_dim(w, max_h, h), max_h)
    }
}

/// `v * num / den`, rounded, at least 1.
fn scale_dim(v: u32, num: u32, den: u32) -> u32 {
    if den == 0 {
        return num.max(1);
    }
    let scaled = (u64::from(v) * u64::from(num) + u64::from(den) / 2) / u64::from(den);
    (scaled.min(u64::from(u32::MAX)) as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/transform.rs"]
mod tests;

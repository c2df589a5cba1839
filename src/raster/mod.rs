//! Crop, resize and glyph-cell stride scaling.

/// Dimension planning and resampling.
pub mod transform;

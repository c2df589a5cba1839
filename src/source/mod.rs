//! Decoded raster sources consumed by the compositor.
//!
//! Container decoding is delegated to `image` (stills) and `gif` (animations); everything past
//! this module works on [`Animation`] values only.

/// Frame and animation model.
pub mod animation;
/// GIF adapter built on the `gif` crate.
pub mod gif;

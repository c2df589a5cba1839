//! Persistent canvas state across an animation.

/// Frame compositor and disposal state machine.
pub mod compositor;

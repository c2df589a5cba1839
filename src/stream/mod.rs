//! Line-oriented glyph stream protocol.
//!
//! ```text
//! <delay>\r\n
//! <glyph row>\r\n      one line per pixel row
//! ...
//! \r\n                 frame boundary
//! ```
//!
//! Still images are written as bare rows with no delay line and no boundary.

/// Bounded in-memory byte channel for concurrent encode/decode.
pub mod channel;
/// Pull-based frame decoder.
pub mod decoder;
/// Frame encoder.
pub mod encoder;
/// Decoded frame value.
pub mod frame;

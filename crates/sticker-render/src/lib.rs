//! Sticker rendering: a QR code for the link pasted onto a base image with
//! the link text underneath.
//!
//! Rendering has no knowledge of the registry. [`PngDirectorySink`] is the
//! [`StickerSink`](sticker_core::StickerSink) the batch job writes through.

pub mod error;
pub mod options;
pub mod qr;
pub mod renderer;
pub mod sink;

#[cfg(test)]
mod test_support;

pub use error::RenderError;
pub use options::RenderOptions;
pub use renderer::{Layout, StickerRenderer};
pub use sink::PngDirectorySink;

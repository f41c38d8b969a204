//! Core types and traits for the sticker generator.
//!
//! This crate provides the code value type, the issued-code registry
//! contract and the sticker sink contract shared by the generator,
//! storage, rendering and batch crates.

pub mod code;
pub mod error;
pub mod registry;
pub mod sink;

pub use code::{Code, CodeLength};
pub use error::{CoreError, RegistryError, SinkError};
pub use registry::{IssuedCode, Registry};
pub use sink::{StickerJob, StickerSink};

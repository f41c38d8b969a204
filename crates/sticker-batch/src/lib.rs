//! Batch sticker generation.
//!
//! This crate drives the generate, moderate, reserve, render loop for a
//! batch of stickers. Core types are re-exported from `sticker_core`.

pub mod error;
pub mod orchestrator;
pub mod report;

pub use error::BatchError;
pub use orchestrator::{BatchOrchestrator, SlotOutcome};
pub use report::{BatchPlan, BatchReport};

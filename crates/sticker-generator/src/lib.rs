//! Candidate code generation and moderation.
//!
//! Generators are pure: they never consult the registry. Whether a
//! candidate is usable is decided afterwards by a [`ModerationFilter`] and
//! then by the registry's reservation.

pub mod moderation;
pub mod random;
pub mod scripted;

pub use moderation::{ModerationFilter, WordList};
pub use random::{RandSource, RandomGenerator, SeededRandom, ThreadRandom};
pub use scripted::ScriptedGenerator;

use sticker_core::{Code, CodeLength};

/// Trait for generating candidate codes.
///
/// Implementations are pure generators that don't interact with storage,
/// so a generated code is only a candidate until it has been reserved.
pub trait Generator: Send + Sync + 'static {
    /// Produces a candidate code of exactly `length` characters.
    fn generate(&self, length: CodeLength) -> Code;
}

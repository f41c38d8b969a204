use crate::Generator;
use std::sync::atomic::{AtomicUsize, Ordering};
use sticker_core::{Code, CodeLength};

/// A generator that replays a fixed list of codes.
///
/// Codes are handed out in order; once the list is exhausted the last code
/// is repeated. The requested length is ignored, the script decides. This
/// makes collision scenarios reproducible without touching the RNG.
#[derive(Debug)]
pub struct ScriptedGenerator {
    codes: Vec<Code>,
    cursor: AtomicUsize,
}

impl ScriptedGenerator {
    /// Returns `None` when `codes` is empty.
    pub fn new(codes: impl IntoIterator<Item = Code>) -> Option<Self> {
        let codes: Vec<Code> = codes.into_iter().collect();
        if codes.is_empty() {
            return None;
        }
        Some(Self {
            codes,
            cursor: AtomicUsize::new(0),
        })
    }

    /// Number of codes handed out so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    fn generate(&self, _length: CodeLength) -> Code {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let last = self.codes.len() - 1;
        self.codes[index.min(last)].clone()
    }
}

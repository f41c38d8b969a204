use std::path::Path;
use sticker_core::Code;
use tracing::debug;

const BUILTIN_BLOCKLIST: &str = include_str!("../data/blocklist.txt");

/// Decides whether a candidate code may be printed.
pub trait ModerationFilter: Send + Sync + 'static {
    /// Returns `false` if the code contains disallowed content.
    fn is_clean(&self, code: &Code) -> bool;
}

/// Rejects codes containing any listed word as a substring.
///
/// Matching is case-insensitive and ignores the separators `-` and `_` on
/// both sides, so `"xFu-Ck9"` is rejected by the entry `"fuck"`.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|word| normalize(word.as_ref().trim()))
            .filter(|word| !word.is_empty())
            .collect();
        words.sort();
        words.dedup();
        Self { words }
    }

    /// Parses one word per line, skipping blank lines and `#` comments.
    pub fn parse(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    /// Reads a word list file in the [`WordList::parse`] format.
    pub fn load(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let list = Self::parse(&std::fs::read_to_string(path)?);
        debug!(path = %path.display(), words = list.len(), "loaded moderation word list");
        Ok(list)
    }

    /// The list shipped with the crate.
    pub fn builtin() -> Self {
        Self::parse(BUILTIN_BLOCKLIST)
    }

    /// Returns the first listed word found in `code`, in normalised form.
    pub fn find(&self, code: &Code) -> Option<&str> {
        let candidate = normalize(code.as_str());
        self.words
            .iter()
            .find(|word| candidate.contains(word.as_str()))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl ModerationFilter for WordList {
    fn is_clean(&self, code: &Code) -> bool {
        self.find(code).is_none()
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !Code::is_separator(*c))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

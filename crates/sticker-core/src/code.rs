use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Longest code the registry schema can hold.
pub const MAX_LENGTH: usize = 64;

/// Length used when none is requested.
pub const DEFAULT_LENGTH: usize = 11;

/// A validated sticker code.
///
/// Codes are case-sensitive, contain only `[a-zA-Z0-9_-]` and never end
/// with a separator, so a printed link never has a trailing `-` or `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Code(String);

impl Code {
    /// Creates a new `Code` after validating the input.
    pub fn new(code: impl Into<String>) -> Result<Self> {
        let code = code.into();
        Self::validate(&code)?;
        Ok(Self(code))
    }

    /// Creates a `Code` without validation.
    ///
    /// Use this only for codes produced by trusted internal sources
    /// (e.g. generators that are guaranteed to produce valid output).
    pub fn new_unchecked(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// The link printed on the sticker: `link_base` immediately followed by the code.
    pub fn link(&self, link_base: &str) -> String {
        format!("{}{}", link_base, self.0)
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `c` may appear anywhere but the last position.
    pub fn is_body_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || Self::is_separator(c)
    }

    /// Whether `c` may appear in the last position.
    pub fn is_tail_char(c: char) -> bool {
        c.is_ascii_alphanumeric()
    }

    pub fn is_separator(c: char) -> bool {
        c == '-' || c == '_'
    }

    fn validate(code: &str) -> Result<()> {
        if code.is_empty() || code.len() > MAX_LENGTH {
            return Err(CoreError::InvalidCode(format!(
                "length must be between 1 and {}, got {}",
                MAX_LENGTH,
                code.len()
            )));
        }

        if !code.chars().all(Self::is_body_char) {
            return Err(CoreError::InvalidCode(format!(
                "must contain only alphanumeric characters, hyphens, or underscores: '{}'",
                code
            )));
        }

        if !code.chars().last().is_some_and(Self::is_tail_char) {
            return Err(CoreError::InvalidCode(format!(
                "must end with an alphanumeric character: '{}'",
                code
            )));
        }

        Ok(())
    }
}

impl Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Code {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Code {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Code> for String {
    fn from(value: Code) -> Self {
        value.0
    }
}

/// Requested code length, in `1..=MAX_LENGTH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CodeLength(usize);

impl CodeLength {
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 || length > MAX_LENGTH {
            return Err(CoreError::InvalidLength(format!(
                "must be between 1 and {}, got {}",
                MAX_LENGTH, length
            )));
        }
        Ok(Self(length))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for CodeLength {
    fn default() -> Self {
        Self(DEFAULT_LENGTH)
    }
}

impl TryFrom<usize> for CodeLength {
    type Error = CoreError;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

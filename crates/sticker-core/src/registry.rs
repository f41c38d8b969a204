use crate::code::Code;
use crate::error::RegistryError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, RegistryError>;

/// Book id stored with every freshly reserved code.
pub const UNASSIGNED_BOOK: i64 = 0;

/// A code that has been issued, as persisted by the registry.
///
/// Records are created once at reservation and never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCode {
    pub code: Code,
    /// Physical book or batch the sticker is attached to; `0` until assigned.
    pub book_id: i64,
}

impl IssuedCode {
    pub fn unassigned(code: Code) -> Self {
        Self {
            code,
            book_id: UNASSIGNED_BOOK,
        }
    }
}

/// Durable set of issued codes.
///
/// The registry is the only authority on which codes are taken. All
/// mutation goes through [`Registry::reserve`], which must be atomic with
/// respect to concurrent callers, including callers in other processes.
#[async_trait]
pub trait Registry: Send + Sync + 'static {
    /// Checks whether a code has already been issued.
    async fn exists(&self, code: &Code) -> Result<bool>;

    /// Claims `code` by storing `{code, book_id: 0}`.
    ///
    /// Returns `Ok(true)` if this call stored the record and `Ok(false)` if
    /// the code was already taken, in which case the store is unchanged.
    async fn reserve(&self, code: &Code) -> Result<bool>;
}

use thiserror::Error;

/// Errors related to the core value types.
pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("invalid code: {0}")]
    InvalidCode(String),
    #[error("invalid code length: {0}")]
    InvalidLength(String),
}

/// Errors surfaced by a [`Registry`](crate::Registry) backend.
///
/// A code that is already taken is not an error: `reserve` reports it as
/// `Ok(false)`.
#[derive(Debug, Clone, Error)]
pub enum RegistryError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
    #[error("invalid registry name: {0}")]
    InvalidName(String),
    #[error("registry query failed: {0}")]
    Query(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
}

/// Errors produced while turning a reserved code into an artifact.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    #[error("failed to render sticker: {0}")]
    Render(String),
    #[error("failed to write sticker: {0}")]
    Io(String),
}

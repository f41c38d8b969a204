use sticker_core::{Code, CoreError, RegistryError, SinkError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BatchError>;

#[derive(Debug, Clone, Error)]
pub enum BatchError {
    /// Bad arguments; raised before the registry is touched.
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error("no clean code found after {rejections} moderation rejections")]
    GenerationExhausted { rejections: u64 },
    /// The code is durably reserved but has no sticker.
    #[error("code {code} is reserved but its sticker was not produced: {source}")]
    OrphanedReservation {
        code: Code,
        #[source]
        source: SinkError,
    },
}

impl BatchError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

impl From<CoreError> for BatchError {
    fn from(value: CoreError) -> Self {
        Self::Configuration(value.to_string())
    }
}

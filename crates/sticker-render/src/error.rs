use thiserror::Error;

pub type Result<T> = std::result::Result<T, RenderError>;

#[derive(Debug, Clone, Error)]
pub enum RenderError {
    #[error("invalid render options: {0}")]
    InvalidOptions(String),
    #[error("cannot encode qr code: {0}")]
    Encode(String),
    #[error("cannot load font: {0}")]
    Font(String),
    #[error("image error: {0}")]
    Image(String),
}

impl From<image::ImageError> for RenderError {
    fn from(value: image::ImageError) -> Self {
        Self::Image(value.to_string())
    }
}

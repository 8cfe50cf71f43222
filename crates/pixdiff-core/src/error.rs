use thiserror::Error;

#[derive(Error, Debug)]
pub enum PixdiffError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load image: {0}")]
    ImageLoad(String),

    #[error("Cannot read pixel data due to cross-origin restrictions; load images directly")]
    PixelAccess,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Sensitivity {0} out of range (expected 1-255)")]
    InvalidSensitivity(u32),

    #[error("Transform precondition failed: {0}")]
    TransformPrecondition(String),

    #[error("Computation cancelled")]
    Cancelled,

    #[error("Image format error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PixdiffError>;

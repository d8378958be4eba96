use thiserror::Error;

#[derive(Debug, Error)]
pub enum MrzError {
    #[error("File doesn't exist: {0}")]
    FileNotFound(String),
    #[error("Image processing error: {0}")]
    ImageLoad(String),
    #[error("Invalid mode: {0}")]
    UnsupportedPixelLayout(String),
    #[error("{operation}: failed -> {phrase} (code {code})")]
    Engine {
        operation: String,
        code: i32,
        phrase: String,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("MRZ parsing error: {0}")]
    MrzParsing(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<image::ImageError> for MrzError {
    fn from(err: image::ImageError) -> Self {
        MrzError::ImageLoad(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MrzError>;

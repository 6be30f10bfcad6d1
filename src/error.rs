use thiserror::Error;

// Codec & matrix error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum QRError {
    #[error("Empty data")]
    EmptyData,
    #[error("Data too long")]
    DataTooLong,
    #[error("Invalid version")]
    InvalidVersion,
    #[error("Invalid character")]
    InvalidChar,
    #[error("Invalid module matrix: {0}")]
    InvalidMatrix(String),
    #[error("Encoder failed: {0}")]
    Encoder(String),
}

pub type QRResult<T> = Result<T, QRError>;

// Export error
//------------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
    #[error("Failed to write image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Failed to write file: {0}")]
    Io(#[from] std::io::Error),
}

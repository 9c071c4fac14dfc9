use thiserror::Error;

/// Errors that can occur during upload store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The upload payload is not a base64 data URI, or its payload is not
    /// valid base64.
    #[error("decode error: {0}")]
    Decode(String),

    /// The filename cannot be stored inside the upload directory.
    #[error("invalid filename: {0:?}")]
    InvalidName(String),

    /// The requested file is not in the upload directory.
    #[error("file not found: {0}")]
    NotFound(String),

    /// A disk I/O error occurred.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl StoreError {
    /// Returns `true` if the error was caused by the caller's input rather
    /// than by the store itself.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Decode(_) | Self::InvalidName(_))
    }
}

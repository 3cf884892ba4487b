use thiserror::Error;

/// Qrcraft error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("QR encoding failed: {0}")]
    Encoding(String),

    #[error("Logo compositing failed: {0}")]
    Compositing(String),

    #[error("Invalid config file: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<qrcode::types::QrError> for Error {
    fn from(e: qrcode::types::QrError) -> Self {
        Error::Encoding(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

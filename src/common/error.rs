use thiserror::Error;

// Error
//------------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq, Eq, Copy, Clone)]
pub enum QRError {
    // Encoding
    #[error("invalid character for the requested mode")]
    InvalidChar,

    // Capacity
    #[error("data too long for the requested version and error correction level")]
    DataTooLong,

    // Configuration
    #[error("invalid version")]
    InvalidVersion,
    #[error("invalid error correction level")]
    InvalidECLevel,
    #[error("invalid masking pattern")]
    InvalidMaskingPattern,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    Encoding,
    Capacity,
    Configuration,
}

impl QRError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidChar => ErrorKind::Encoding,
            Self::DataTooLong => ErrorKind::Capacity,
            Self::InvalidVersion | Self::InvalidECLevel | Self::InvalidMaskingPattern => {
                ErrorKind::Configuration
            }
        }
    }
}

pub type QRResult<T> = Result<T, QRError>;

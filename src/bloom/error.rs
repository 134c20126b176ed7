use bincode::error::{DecodeError, EncodeError};
use thiserror::Error;

pub type BloomResult<T> = std::result::Result<T, BloomError>;

#[derive(Error, Debug, PartialEq)]
pub enum BloomError {
    #[error("Capacity must be greater than 0")]
    ZeroCapacity,

    #[error("False positive rate must be between 0 and 1, got {rate}")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to allocate {bytes} bytes for the bit array")]
    AllocationFailure { bytes: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<EncodeError> for BloomError {
    fn from(err: EncodeError) -> Self {
        BloomError::SerializationError(err.to_string())
    }
}

impl From<DecodeError> for BloomError {
    fn from(err: DecodeError) -> Self {
        BloomError::SerializationError(err.to_string())
    }
}

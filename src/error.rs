//! Error types for the redaction detector

use std::fmt;

/// Errors that can occur while detecting redacted regions
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// Invalid input data (empty waveform, zero sample rate, ragged spectrogram)
    InvalidInput(String),

    /// Invalid configuration parameters
    InvalidConfig(String),

    /// Audio decoding error
    DecodingError(String),

    /// An internal pipeline invariant did not hold (e.g. unpaired region edges)
    InvariantViolation(String),

    /// Reading or writing a file failed
    IoError(String),
}

impl fmt::Display for DetectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            DetectionError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            DetectionError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            DetectionError::InvariantViolation(msg) => write!(f, "Invariant violation: {}", msg),
            DetectionError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for DetectionError {}

impl From<std::io::Error> for DetectionError {
    fn from(err: std::io::Error) -> Self {
        DetectionError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for DetectionError {
    fn from(err: serde_json::Error) -> Self {
        DetectionError::InvalidInput(format!("JSON: {}", err))
    }
}

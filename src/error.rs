//! Custom error types for fileseal
//!
//! This module defines the error hierarchy for the codec and its callers
//! using thiserror for ergonomic error definitions.

use thiserror::Error;

/// The main error type for fileseal operations
///
/// None of the variants ever carry passphrase or key material.
#[derive(Error, Debug)]
pub enum SealError {
    /// The source bytes (plain file or container) could not be obtained
    #[error("Failed to read input: {0}")]
    InputReadFailed(String),

    /// Base64 or JSON parsing of a container failed
    #[error("Malformed container: {0}")]
    MalformedContainer(String),

    /// The container does not carry the expected provenance marker
    #[error("Unrecognized format: {0}")]
    UnrecognizedFormat(String),

    /// Cipher-level failure. Wrong passphrase and corrupted data are
    /// reported identically.
    #[error("Decryption failed: wrong passphrase or corrupted data")]
    DecryptionFailed,

    /// Unexpected failure while encrypting or serializing
    #[error("Encode failed: {0}")]
    EncodeFailed(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors on the output side
    #[error("I/O error: {0}")]
    Io(String),

    /// Invalid arguments supplied by the caller
    #[error("Validation error: {0}")]
    Validation(String),
}

impl SealError {
    /// Check if this is a cipher-level decode failure
    pub fn is_decryption_failure(&self) -> bool {
        matches!(self, Self::DecryptionFailed)
    }

    /// Check if the input was rejected before any decryption was attempted
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedContainer(_) | Self::UnrecognizedFormat(_)
        )
    }
}

impl From<std::io::Error> for SealError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type alias for fileseal operations
pub type SealResult<T> = Result<T, SealError>;

//! # Error Types
//!
//! Errors raised while parsing identifiers.

use thiserror::Error;

/// Errors that can occur when constructing or parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// Raw byte length does not match the identifier width.
    #[error("Invalid identifier length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// String is not valid base58.
    #[error("Invalid base58 encoding: {0}")]
    Base58(String),

    /// Decoded string is too short to carry a checksum.
    #[error("cb58 string is missing its checksum")]
    MissingChecksum,

    /// Checksum does not match the decoded payload.
    #[error("cb58 checksum mismatch")]
    BadChecksum,

    /// Node ID string lacks the `NodeID-` prefix.
    #[error("Missing prefix: expected {expected}")]
    MissingPrefix { expected: &'static str },
}

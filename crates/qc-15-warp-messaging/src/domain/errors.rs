//! # Domain Errors
//!
//! Error types for Warp message construction, signing and verification.

use thiserror::Error;

/// Failure to parse bytes at any codec boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Leading codec version is not supported.
    #[error("Unknown codec version: {found}")]
    UnknownCodecVersion {
        /// Version found in the input
        found: u16,
    },

    /// Type tag is not registered for this kind of blob.
    #[error("Unknown {kind} type: {type_id}")]
    UnknownType {
        /// What was being decoded
        kind: &'static str,
        /// Tag found in the input
        type_id: u32,
    },

    /// A fixed-width field ran past the end of the input.
    #[error("Truncated input: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        /// Bytes the field requires
        needed: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// A length prefix declares more bytes than remain.
    #[error("Declared length {declared} exceeds remaining {remaining} bytes")]
    LengthOverflow {
        /// Declared byte length
        declared: usize,
        /// Bytes left in the buffer
        remaining: usize,
    },

    /// Bytes left over after a complete value was decoded.
    #[error("{remaining} trailing bytes after decoding")]
    TrailingBytes {
        /// Unconsumed bytes
        remaining: usize,
    },

    /// Input exceeds the maximum blob size.
    #[error("Input of {size} bytes exceeds maximum of {max}")]
    TooLarge {
        /// Input size
        size: usize,
        /// Maximum accepted size
        max: usize,
    },

    /// Boolean byte other than 0 or 1.
    #[error("Invalid boolean byte: {0}")]
    InvalidBool(u8),

    /// Signer bitset has a leading zero byte.
    #[error("Signer bitset is not minimally encoded")]
    NonMinimalBitset,
}

/// Reasons a signer does not line up with the committee.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommitteeMismatch {
    /// Public key is not a committee member.
    #[error("signer {public_key} is not in the committee")]
    UnknownSigner {
        /// Hex of the compressed public key
        public_key: String,
    },

    /// Signer resolves to a different index than claimed.
    #[error("signer claimed index {claimed} but occupies index {actual}")]
    IndexMismatch {
        /// Index asserted by the contributor
        claimed: usize,
        /// Index resolved from the committee
        actual: usize,
    },

    /// Bitset references an index beyond the committee.
    #[error("signer index {index} out of range for committee of {size}")]
    IndexOutOfRange {
        /// Offending index
        index: usize,
        /// Committee size
        size: usize,
    },

    /// Contribution or signature targets another committee snapshot.
    #[error("committee epoch {actual} does not match expected epoch {expected}")]
    EpochMismatch {
        /// Epoch the collector was built for
        expected: u64,
        /// Epoch of the offered committee
        actual: u64,
    },

    /// Same epoch, but the member lists differ.
    #[error("committee at epoch {epoch} has different members than expected")]
    MembershipMismatch {
        /// Shared epoch number
        epoch: u64,
    },
}

/// Warp messaging error types.
#[derive(Debug, Error)]
pub enum WarpError {
    /// Malformed or truncated bytes.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Invalid secret-key material.
    #[error("Key error: {0}")]
    Key(#[source] shared_crypto::CryptoError),

    /// Signing, aggregation or verification failure.
    #[error("Signature error: {0}")]
    Signature(String),

    /// Signer does not match its claimed bitset position.
    #[error("Committee mismatch: {0}")]
    CommitteeMismatch(#[from] CommitteeMismatch),

    /// Signed weight below the quorum threshold.
    #[error("Insufficient weight: {signed}/{total} below {numerator}/{denominator}")]
    InsufficientWeight {
        /// Weight of the signers
        signed: u64,
        /// Total committee weight
        total: u64,
        /// Quorum numerator
        numerator: u64,
        /// Quorum denominator
        denominator: u64,
    },

    /// Committee construction failed.
    #[error("Invalid committee: {0}")]
    InvalidCommittee(String),

    /// Owner fails the threshold/ordering rules.
    #[error("Invalid owner: {0}")]
    InvalidOwner(String),

    /// Invalid registration state transition.
    #[error("Invalid registration transition: {from} -> {to}")]
    InvalidStateTransition {
        /// Current state
        from: String,
        /// Attempted state
        to: String,
    },

    /// External collaborator failure.
    #[error("Network error: {0}")]
    Network(String),

    /// External collaborator did not answer in time.
    #[error("{operation} timed out after {after_ms}ms")]
    Timeout {
        /// Boundary that timed out
        operation: &'static str,
        /// Elapsed budget in milliseconds
        after_ms: u64,
    },
}

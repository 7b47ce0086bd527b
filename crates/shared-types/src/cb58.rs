//! # CB58 Encoding
//!
//! Base58 with a 4-byte checksum taken from the tail of the SHA-256 digest of
//! the payload. This is the human-readable form of every identifier.

use sha2::{Digest, Sha256};

use crate::errors::IdError;

/// Checksum length appended to the payload before base58 encoding.
pub const CHECKSUM_LEN: usize = 4;

/// Encode bytes as cb58.
pub fn encode(bytes: &[u8]) -> String {
    let mut buf = Vec::with_capacity(bytes.len() + CHECKSUM_LEN);
    buf.extend_from_slice(bytes);
    buf.extend_from_slice(&checksum(bytes));
    bs58::encode(buf).into_string()
}

/// Decode a cb58 string, verifying its checksum.
pub fn decode(input: &str) -> Result<Vec<u8>, IdError> {
    let raw = bs58::decode(input)
        .into_vec()
        .map_err(|e| IdError::Base58(e.to_string()))?;

    if raw.len() < CHECKSUM_LEN {
        return Err(IdError::MissingChecksum);
    }

    let (payload, check) = raw.split_at(raw.len() - CHECKSUM_LEN);
    if checksum(payload) != check {
        return Err(IdError::BadChecksum);
    }
    Ok(payload.to_vec())
}

fn checksum(bytes: &[u8]) -> [u8; CHECKSUM_LEN] {
    let digest = Sha256::digest(bytes);
    let mut out = [0u8; CHECKSUM_LEN];
    out.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
    out
}

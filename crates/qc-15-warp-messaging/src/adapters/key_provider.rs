//! Key Provider Adapters
//!
//! Implement `KeyProvider` over raw or hex-encoded secret-key bytes.

use shared_crypto::{BlsSecretKey, CryptoError};
use zeroize::Zeroizing;

use crate::domain::WarpError;
use crate::ports::outbound::KeyProvider;

/// Key provider over raw 32-byte big-endian key material.
pub struct RawKeyProvider {
    bytes: Zeroizing<Vec<u8>>,
}

impl RawKeyProvider {
    /// Wrap raw key bytes.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }
}

impl KeyProvider for RawKeyProvider {
    fn signing_key(&self) -> Result<BlsSecretKey, WarpError> {
        BlsSecretKey::from_bytes(&self.bytes).map_err(WarpError::Key)
    }
}

/// Key provider over a hex string, with or without `0x`.
pub struct HexKeyProvider {
    hex: Zeroizing<String>,
}

impl HexKeyProvider {
    /// Wrap a hex-encoded key.
    pub fn new(hex: impl Into<String>) -> Self {
        Self {
            hex: Zeroizing::new(hex.into()),
        }
    }
}

impl KeyProvider for HexKeyProvider {
    fn signing_key(&self) -> Result<BlsSecretKey, WarpError> {
        let trimmed = self.hex.trim();
        let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = Zeroizing::new(hex::decode(digits).map_err(|e| {
            WarpError::Key(CryptoError::InvalidInput(format!("signing key hex: {e}")))
        })?);
        BlsSecretKey::from_bytes(&bytes).map_err(WarpError::Key)
    }
}

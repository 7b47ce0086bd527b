//! # Signature Engine
//!
//! Pure signing primitives. Every signer signs the same canonical unsigned
//! bytes, so contributions can be produced independently and combined by
//! anyone.

use shared_crypto::{BlsSecretKey, BlsSignature};
use tracing::debug;

use crate::domain::{
    BitSetSignature, Committee, Message, SignatureContribution, SignerBitset, UnsignedMessage,
    WarpError,
};

/// BLS signature over exactly `unsigned_bytes`.
pub fn sign(secret_key: &BlsSecretKey, unsigned_bytes: &[u8]) -> BlsSignature {
    secret_key.sign(unsigned_bytes)
}

/// Sign `unsigned` and tag the result with the signer's canonical index.
///
/// Fails with a committee mismatch if the key is not in `committee`.
pub fn contribute(
    secret_key: &BlsSecretKey,
    unsigned: &UnsignedMessage,
    committee: &Committee,
) -> Result<SignatureContribution, WarpError> {
    let public_key = secret_key.public_key();
    let claimed_index = committee.index_of(&public_key)?;
    debug!(
        message_id = %unsigned.id(),
        index = claimed_index,
        epoch = committee.epoch(),
        "Signing unsigned message"
    );
    Ok(SignatureContribution {
        claimed_index,
        public_key,
        signature: sign(secret_key, unsigned.bytes()),
    })
}

/// Combine signatures. Order-independent; one signature maps to itself.
pub fn aggregate(signatures: &[BlsSignature]) -> Result<BlsSignature, WarpError> {
    BlsSignature::aggregate(signatures)
        .map_err(|e| WarpError::Signature(format!("aggregation failed: {e}")))
}

/// Minimal bitset bytes for a set of canonical indices.
pub fn attach_bitset(signer_indices: impl IntoIterator<Item = usize>) -> Vec<u8> {
    SignerBitset::from_indices(signer_indices).to_bytes()
}

/// Serialize the signed message blob handed to the transaction issuer.
///
/// Fails if the blob would exceed the decoder's size limit.
pub fn finalize(
    unsigned: &UnsignedMessage,
    signature: BitSetSignature,
) -> Result<Vec<u8>, WarpError> {
    Ok(Message::try_new(unsigned.clone(), signature)?.bytes().to_vec())
}

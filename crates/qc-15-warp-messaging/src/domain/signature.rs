//! # Warp Signatures
//!
//! Signature forms that can accompany an unsigned message. Only the bit-set
//! form is defined: a signer bitset over the canonical committee plus one
//! aggregate BLS signature.
//!
//! Wire form: `[u32 tag = 0][u32 len][bitset][96-byte signature]`.

use shared_crypto::{BlsPublicKey, BlsSignature, SIGNATURE_LEN};
use tracing::debug;

use super::bitset::SignerBitset;
use super::codec::{Packer, Unpacker};
use super::committee::Committee;
use super::errors::{CommitteeMismatch, DecodeError, WarpError};
use super::invariants::{
    invariant_minimal_bitset, invariant_signers_in_committee, invariant_sufficient_weight,
};
use super::unsigned_message::UnsignedMessage;
use super::value_objects::Quorum;

/// Tag of [`BitSetSignature`].
pub const BIT_SET_SIGNATURE_TYPE_ID: u32 = 0;

/// Smallest encoded bit-set signature: tag, length, one bitset byte, aggregate.
pub const MIN_BIT_SET_SIGNATURE_LEN: usize = 4 + 4 + 1 + SIGNATURE_LEN;

/// Signer bitset plus aggregate signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitSetSignature {
    /// Minimal bitset encoding.
    pub signers: Vec<u8>,
    /// Compressed aggregate signature.
    pub signature: [u8; SIGNATURE_LEN],
}

impl BitSetSignature {
    /// Combine a bitset and its aggregate.
    pub fn new(signers: &SignerBitset, signature: &BlsSignature) -> Self {
        Self {
            signers: signers.to_bytes(),
            signature: signature.to_bytes(),
        }
    }

    /// Decode the signer set.
    pub fn signer_bitset(&self) -> Result<SignerBitset, DecodeError> {
        SignerBitset::from_bytes(&self.signers)
    }

    /// Parse the aggregate signature as a curve point.
    pub fn aggregate_signature(&self) -> Result<BlsSignature, WarpError> {
        BlsSignature::from_bytes(&self.signature)
            .map_err(|e| WarpError::Signature(format!("aggregate signature: {e}")))
    }

    /// Append the tagged encoding.
    pub fn pack(&self, packer: &mut Packer) {
        packer.pack_u32(BIT_SET_SIGNATURE_TYPE_ID);
        packer.pack_bytes(&self.signers);
        packer.pack_fixed(&self.signature);
    }

    /// Tagged encoding on its own.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut packer = Packer::new();
        self.pack(&mut packer);
        packer.finish()
    }

    fn unpack_fields(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            signers: unpacker.unpack_bytes()?,
            signature: unpacker.unpack_fixed()?,
        })
    }

    /// Check the aggregate against `unsigned` under `committee`.
    ///
    /// The bitset must be minimal and in range, the signers must meet
    /// `quorum`, and the aggregate must verify against the sum of their keys.
    pub fn verify(
        &self,
        unsigned: &UnsignedMessage,
        committee: &Committee,
        quorum: &Quorum,
    ) -> Result<(), WarpError> {
        if !invariant_minimal_bitset(&self.signers) {
            return Err(DecodeError::NonMinimalBitset.into());
        }
        let bitset = self.signer_bitset()?;
        if !invariant_signers_in_committee(&bitset, committee) {
            return Err(CommitteeMismatch::IndexOutOfRange {
                index: bitset.max_index().unwrap_or_default(),
                size: committee.len(),
            }
            .into());
        }

        let signed = committee.weight_of(&bitset)?;
        invariant_sufficient_weight(signed, committee.total_weight(), quorum)?;

        let keys = committee.public_keys_of(&bitset)?;
        let aggregate_key = BlsPublicKey::aggregate(&keys)
            .map_err(|e| WarpError::Signature(format!("aggregate public key: {e}")))?;
        let signature = self.aggregate_signature()?;

        if !aggregate_key.verify(unsigned.bytes(), &signature) {
            return Err(WarpError::Signature(format!(
                "aggregate does not verify for message {}",
                unsigned.id()
            )));
        }
        debug!(
            message_id = %unsigned.id(),
            signers = bitset.len(),
            signed_weight = signed,
            "Verified bit-set signature"
        );
        Ok(())
    }
}

/// Any Warp signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarpSignature {
    /// Tag 0.
    BitSet(BitSetSignature),
}

impl WarpSignature {
    /// Append the tagged encoding.
    pub fn pack(&self, packer: &mut Packer) {
        match self {
            Self::BitSet(sig) => sig.pack(packer),
        }
    }

    /// Read a tagged signature.
    pub fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        match unpacker.unpack_u32()? {
            BIT_SET_SIGNATURE_TYPE_ID => Ok(Self::BitSet(BitSetSignature::unpack_fields(
                unpacker,
            )?)),
            type_id => Err(DecodeError::UnknownType {
                kind: "signature",
                type_id,
            }),
        }
    }

    /// Check the signature against `unsigned`.
    pub fn verify(
        &self,
        unsigned: &UnsignedMessage,
        committee: &Committee,
        quorum: &Quorum,
    ) -> Result<(), WarpError> {
        match self {
            Self::BitSet(sig) => sig.verify(unsigned, committee, quorum),
        }
    }
}

impl From<BitSetSignature> for WarpSignature {
    fn from(sig: BitSetSignature) -> Self {
        Self::BitSet(sig)
    }
}

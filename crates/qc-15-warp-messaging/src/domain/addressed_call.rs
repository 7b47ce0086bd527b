//! # Addressed Call Envelope
//!
//! Binds a source identity to an opaque payload. The address is not parsed
//! at this layer; an empty address marks a chain-level call.
//!
//! Wire form: `[u16 version][u32 tag = 1][u32 len][address][u32 len][payload]`.
//! Tag 0 is the bare [`HashPayload`] variant.

use shared_types::Id;

use super::codec::{Packer, Unpacker};
use super::errors::DecodeError;

/// Tag of [`HashPayload`].
pub const HASH_TYPE_ID: u32 = 0;

/// Tag of [`AddressedCall`].
pub const ADDRESSED_CALL_TYPE_ID: u32 = 1;

/// Payload bytes attributed to a source address.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressedCall {
    /// Opaque source identity, possibly empty.
    pub source_address: Vec<u8>,
    /// Opaque payload bytes.
    pub payload: Vec<u8>,
}

impl AddressedCall {
    /// Create an envelope.
    pub fn new(source_address: impl Into<Vec<u8>>, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            source_address: source_address.into(),
            payload: payload.into(),
        }
    }

    /// Canonical encoding.
    pub fn to_bytes(&self) -> Vec<u8> {
        wrap(&self.source_address, &self.payload)
    }

    /// Parse an envelope, rejecting any other warp payload kind.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        match WarpPayload::decode(bytes)? {
            WarpPayload::AddressedCall(call) => Ok(call),
            WarpPayload::Hash(_) => Err(DecodeError::UnknownType {
                kind: "addressed call",
                type_id: HASH_TYPE_ID,
            }),
        }
    }
}

/// Encode an address and payload as an addressed call.
pub fn wrap(source_address: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut packer = Packer::versioned();
    packer.pack_u32(ADDRESSED_CALL_TYPE_ID);
    packer.pack_bytes(source_address);
    packer.pack_bytes(payload);
    packer.finish()
}

/// Split addressed-call bytes back into address and payload.
pub fn unwrap(bytes: &[u8]) -> Result<(Vec<u8>, Vec<u8>), DecodeError> {
    let call = AddressedCall::from_bytes(bytes)?;
    Ok((call.source_address, call.payload))
}

/// A bare 32-byte commitment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HashPayload {
    /// Committed hash.
    pub hash: Id,
}

/// Any warp payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WarpPayload {
    /// Tag 0.
    Hash(HashPayload),
    /// Tag 1.
    AddressedCall(AddressedCall),
}

impl WarpPayload {
    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Hash(h) => {
                let mut packer = Packer::versioned();
                packer.pack_u32(HASH_TYPE_ID);
                packer.pack_fixed(h.hash.as_bytes());
                packer.finish()
            }
            Self::AddressedCall(call) => call.to_bytes(),
        }
    }

    /// Parse any warp payload.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut unpacker = Unpacker::new(bytes)?;
        unpacker.unpack_version()?;
        let payload = match unpacker.unpack_u32()? {
            HASH_TYPE_ID => Self::Hash(HashPayload {
                hash: Id::new(unpacker.unpack_fixed()?),
            }),
            ADDRESSED_CALL_TYPE_ID => Self::AddressedCall(AddressedCall {
                source_address: unpacker.unpack_bytes()?,
                payload: unpacker.unpack_bytes()?,
            }),
            type_id => {
                return Err(DecodeError::UnknownType {
                    kind: "warp payload",
                    type_id,
                })
            }
        };
        unpacker.finish()?;
        Ok(payload)
    }
}

//! # Unsigned Message
//!
//! The canonical signable byte sequence. The encoding is computed once at
//! construction and is the only thing that is ever hashed or signed.

use std::fmt;
use std::sync::OnceLock;

use shared_crypto::sha256;
use shared_types::{Id, NetworkId};

use super::codec::{Packer, Unpacker};
use super::errors::DecodeError;

/// `{networkID, sourceChainID, payload}` plus its canonical encoding.
#[derive(Clone)]
pub struct UnsignedMessage {
    network_id: NetworkId,
    source_chain_id: Id,
    payload: Vec<u8>,
    bytes: Vec<u8>,
    id: OnceLock<Id>,
}

impl UnsignedMessage {
    /// Bind a network, a source chain and addressed-call bytes.
    pub fn build(network_id: NetworkId, source_chain_id: Id, payload: impl Into<Vec<u8>>) -> Self {
        let payload = payload.into();
        let mut packer = Packer::versioned();
        packer.pack_u32(network_id);
        packer.pack_fixed(source_chain_id.as_bytes());
        packer.pack_bytes(&payload);
        Self {
            network_id,
            source_chain_id,
            payload,
            bytes: packer.finish(),
            id: OnceLock::new(),
        }
    }

    /// Parse a standalone unsigned message.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut unpacker = Unpacker::new(bytes)?;
        let message = Self::unpack(&mut unpacker)?;
        unpacker.finish()?;
        Ok(message)
    }

    /// Read an unsigned message from the front of a larger blob.
    pub fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        unpacker.unpack_version()?;
        let network_id = unpacker.unpack_u32()?;
        let source_chain_id = Id::new(unpacker.unpack_fixed()?);
        let payload = unpacker.unpack_bytes()?;
        Ok(Self::build(network_id, source_chain_id, payload))
    }

    /// Canonical encoding.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// SHA-256 of the canonical encoding, computed on first use.
    pub fn id(&self) -> Id {
        *self.id.get_or_init(|| Id::new(sha256(&self.bytes)))
    }

    /// Network identifier.
    pub fn network_id(&self) -> NetworkId {
        self.network_id
    }

    /// Source chain identifier.
    pub fn source_chain_id(&self) -> Id {
        self.source_chain_id
    }

    /// Addressed-call bytes.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl PartialEq for UnsignedMessage {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for UnsignedMessage {}

impl fmt::Debug for UnsignedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnsignedMessage")
            .field("network_id", &self.network_id)
            .field("source_chain_id", &self.source_chain_id)
            .field("payload_len", &self.payload.len())
            .field("id", &self.id())
            .finish()
    }
}

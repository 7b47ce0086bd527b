//! # Signed Message
//!
//! Final immutable artifact handed to the transaction issuer:
//! `[unsigned message bytes][signature encoding]`.

use shared_types::Id;

use super::codec::{Packer, Unpacker, MAX_MESSAGE_SIZE};
use super::committee::Committee;
use super::errors::{DecodeError, WarpError};
use super::signature::WarpSignature;
use super::unsigned_message::UnsignedMessage;
use super::value_objects::Quorum;

/// Unsigned message plus signature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    unsigned: UnsignedMessage,
    signature: WarpSignature,
    bytes: Vec<u8>,
}

impl Message {
    /// Seal an unsigned message with a signature.
    pub fn new(unsigned: UnsignedMessage, signature: impl Into<WarpSignature>) -> Self {
        let signature = signature.into();
        let mut packer = Packer::new();
        packer.pack_fixed(unsigned.bytes());
        signature.pack(&mut packer);
        Self {
            unsigned,
            signature,
            bytes: packer.finish(),
        }
    }

    /// Seal, rejecting a blob that [`Self::from_bytes`] would refuse to parse.
    pub fn try_new(
        unsigned: UnsignedMessage,
        signature: impl Into<WarpSignature>,
    ) -> Result<Self, WarpError> {
        let message = Self::new(unsigned, signature);
        if message.bytes.len() > MAX_MESSAGE_SIZE {
            return Err(DecodeError::TooLarge {
                size: message.bytes.len(),
                max: MAX_MESSAGE_SIZE,
            }
            .into());
        }
        Ok(message)
    }

    /// Parse a signed message.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut unpacker = Unpacker::new(bytes)?;
        let unsigned = UnsignedMessage::unpack(&mut unpacker)?;
        let signature = WarpSignature::unpack(&mut unpacker)?;
        unpacker.finish()?;
        Ok(Self::new(unsigned, signature))
    }

    /// Canonical encoding.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Identifier of the unsigned part.
    pub fn id(&self) -> Id {
        self.unsigned.id()
    }

    /// The signed content.
    pub fn unsigned(&self) -> &UnsignedMessage {
        &self.unsigned
    }

    /// The attached signature.
    pub fn signature(&self) -> &WarpSignature {
        &self.signature
    }

    /// Verify the signature over the unsigned bytes.
    pub fn verify(&self, committee: &Committee, quorum: &Quorum) -> Result<(), WarpError> {
        self.signature.verify(&self.unsigned, committee, quorum)
    }
}

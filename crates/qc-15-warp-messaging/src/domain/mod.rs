//! # Domain Module
//!
//! Wire types, committee snapshot and registration lifecycle.

pub mod addressed_call;
pub mod bitset;
pub mod codec;
pub mod committee;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod message;
pub mod payload;
pub mod signature;
pub mod unsigned_message;
pub mod value_objects;

pub use addressed_call::{AddressedCall, HashPayload, WarpPayload};
pub use bitset::SignerBitset;
pub use codec::{Packer, Unpacker, CODEC_VERSION, MAX_MESSAGE_SIZE};
pub use committee::{Committee, CommitteeMember};
pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use message::Message;
pub use payload::{
    PChainOwner, Payload, PayloadBody, RegisterSubnetValidator, SubnetConversion,
    SubnetValidatorRegistration, SubnetValidatorWeight,
};
pub use signature::{
    BitSetSignature, WarpSignature, BIT_SET_SIGNATURE_TYPE_ID, MIN_BIT_SET_SIGNATURE_LEN,
};
pub use unsigned_message::UnsignedMessage;
pub use value_objects::*;

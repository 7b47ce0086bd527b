//! # Platform Payloads
//!
//! Typed actions carried inside an addressed call. Every encoding starts with
//! the codec version and a `u32` type tag; the tag alone decides how the rest
//! of the bytes are parsed.
//!
//! | Tag | Payload |
//! |-----|---------|
//! | 0 | `SubnetConversion` |
//! | 1 | `RegisterSubnetValidator` |
//! | 2 | `SubnetValidatorRegistration` |
//! | 3 | `SubnetValidatorWeight` |

use serde::{Serialize, Serializer};
use shared_crypto::PUBLIC_KEY_LEN;
use shared_types::{Id, NodeId, ShortId};

use super::codec::{Packer, Unpacker};
use super::errors::{DecodeError, WarpError};

/// Tag of [`SubnetConversion`].
pub const SUBNET_CONVERSION_TYPE_ID: u32 = 0;

/// Tag of [`RegisterSubnetValidator`].
pub const REGISTER_SUBNET_VALIDATOR_TYPE_ID: u32 = 1;

/// Tag of [`SubnetValidatorRegistration`].
pub const SUBNET_VALIDATOR_REGISTRATION_TYPE_ID: u32 = 2;

/// Tag of [`SubnetValidatorWeight`].
pub const SUBNET_VALIDATOR_WEIGHT_TYPE_ID: u32 = 3;

/// A payload body with a fixed type tag.
pub trait PayloadBody: Sized {
    /// Tag written after the codec version.
    const TYPE_ID: u32;

    /// Write the fields, without version or tag.
    fn pack(&self, packer: &mut Packer);

    /// Read the fields, without version or tag.
    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError>;

    /// Full canonical encoding: version, tag, fields.
    fn to_bytes(&self) -> Vec<u8> {
        let mut packer = Packer::versioned();
        packer.pack_u32(Self::TYPE_ID);
        self.pack(&mut packer);
        packer.finish()
    }
}

/// Threshold owner on the platform chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PChainOwner {
    /// Signatures required to act as this owner.
    pub threshold: u32,
    /// Authorized addresses.
    pub addresses: Vec<ShortId>,
}

impl PChainOwner {
    /// Owner that nobody can act as.
    pub fn unowned() -> Self {
        Self::default()
    }

    /// Check the threshold and ordering rules.
    ///
    /// Not applied by the codec; callers decide whether to enforce it.
    pub fn verify(&self) -> Result<(), WarpError> {
        let count = self.addresses.len();
        if self.threshold as usize > count {
            return Err(WarpError::InvalidOwner(format!(
                "threshold {} exceeds {} addresses",
                self.threshold, count
            )));
        }
        if self.threshold == 0 && count > 0 {
            return Err(WarpError::InvalidOwner(
                "zero threshold with non-empty address list".into(),
            ));
        }
        if !self.addresses.windows(2).all(|w| w[0] < w[1]) {
            return Err(WarpError::InvalidOwner(
                "addresses must be sorted and unique".into(),
            ));
        }
        Ok(())
    }

    fn pack(&self, packer: &mut Packer) {
        packer.pack_u32(self.threshold);
        packer.pack_u32(self.addresses.len() as u32);
        for address in &self.addresses {
            packer.pack_fixed(address.as_bytes());
        }
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        let threshold = unpacker.unpack_u32()?;
        let count = unpacker.unpack_count(ShortId::LEN)?;
        let mut addresses = Vec::with_capacity(count);
        for _ in 0..count {
            addresses.push(ShortId::new(unpacker.unpack_fixed()?));
        }
        Ok(Self {
            threshold,
            addresses,
        })
    }
}

/// Records that a subnet was converted; `id` commits to the conversion data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubnetConversion {
    /// Conversion identifier.
    pub id: Id,
}

impl PayloadBody for SubnetConversion {
    const TYPE_ID: u32 = SUBNET_CONVERSION_TYPE_ID;

    fn pack(&self, packer: &mut Packer) {
        packer.pack_fixed(self.id.as_bytes());
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            id: Id::new(unpacker.unpack_fixed()?),
        })
    }
}

/// Request to add a validator to a subnet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterSubnetValidator {
    /// Subnet the validator joins.
    #[serde(rename = "subnetID")]
    pub subnet_id: Id,
    /// Node being registered.
    #[serde(rename = "nodeID")]
    pub node_id: NodeId,
    /// Compressed BLS public key of the node.
    #[serde(serialize_with = "serialize_hex")]
    pub bls_public_key: [u8; PUBLIC_KEY_LEN],
    /// Unix timestamp after which the request is void.
    pub expiry: u64,
    /// Owner of any balance left when the validator is removed.
    pub remaining_balance_owner: PChainOwner,
    /// Owner allowed to disable the validator.
    pub disable_owner: PChainOwner,
    /// Stake weight.
    pub weight: u64,
}

impl PayloadBody for RegisterSubnetValidator {
    const TYPE_ID: u32 = REGISTER_SUBNET_VALIDATOR_TYPE_ID;

    fn pack(&self, packer: &mut Packer) {
        packer.pack_fixed(self.subnet_id.as_bytes());
        packer.pack_fixed(self.node_id.as_bytes());
        packer.pack_fixed(&self.bls_public_key);
        packer.pack_u64(self.expiry);
        self.remaining_balance_owner.pack(packer);
        self.disable_owner.pack(packer);
        packer.pack_u64(self.weight);
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            subnet_id: Id::new(unpacker.unpack_fixed()?),
            node_id: NodeId::new(unpacker.unpack_fixed()?),
            bls_public_key: unpacker.unpack_fixed()?,
            expiry: unpacker.unpack_u64()?,
            remaining_balance_owner: PChainOwner::unpack(unpacker)?,
            disable_owner: PChainOwner::unpack(unpacker)?,
            weight: unpacker.unpack_u64()?,
        })
    }
}

/// Reports whether a validation was (or will never be) registered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetValidatorRegistration {
    /// Validation this report is about.
    #[serde(rename = "validationID")]
    pub validation_id: Id,
    /// True if registered, false if removed or never registrable.
    pub registered: bool,
}

impl PayloadBody for SubnetValidatorRegistration {
    const TYPE_ID: u32 = SUBNET_VALIDATOR_REGISTRATION_TYPE_ID;

    fn pack(&self, packer: &mut Packer) {
        packer.pack_fixed(self.validation_id.as_bytes());
        packer.pack_bool(self.registered);
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            validation_id: Id::new(unpacker.unpack_fixed()?),
            registered: unpacker.unpack_bool()?,
        })
    }
}

/// Sets the weight of an existing validation. Weight zero removes it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetValidatorWeight {
    /// Validation being updated.
    #[serde(rename = "validationID")]
    pub validation_id: Id,
    /// Strictly increasing per validation.
    pub nonce: u64,
    /// New weight.
    pub weight: u64,
}

impl PayloadBody for SubnetValidatorWeight {
    const TYPE_ID: u32 = SUBNET_VALIDATOR_WEIGHT_TYPE_ID;

    fn pack(&self, packer: &mut Packer) {
        packer.pack_fixed(self.validation_id.as_bytes());
        packer.pack_u64(self.nonce);
        packer.pack_u64(self.weight);
    }

    fn unpack(unpacker: &mut Unpacker<'_>) -> Result<Self, DecodeError> {
        Ok(Self {
            validation_id: Id::new(unpacker.unpack_fixed()?),
            nonce: unpacker.unpack_u64()?,
            weight: unpacker.unpack_u64()?,
        })
    }
}

/// Any platform payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum Payload {
    /// Tag 0.
    SubnetConversion(SubnetConversion),
    /// Tag 1.
    RegisterSubnetValidator(RegisterSubnetValidator),
    /// Tag 2.
    SubnetValidatorRegistration(SubnetValidatorRegistration),
    /// Tag 3.
    SubnetValidatorWeight(SubnetValidatorWeight),
}

impl Payload {
    /// The variant's type tag.
    pub fn type_id(&self) -> u32 {
        match self {
            Self::SubnetConversion(_) => SubnetConversion::TYPE_ID,
            Self::RegisterSubnetValidator(_) => RegisterSubnetValidator::TYPE_ID,
            Self::SubnetValidatorRegistration(_) => SubnetValidatorRegistration::TYPE_ID,
            Self::SubnetValidatorWeight(_) => SubnetValidatorWeight::TYPE_ID,
        }
    }

    /// Canonical encoding.
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::SubnetConversion(p) => p.to_bytes(),
            Self::RegisterSubnetValidator(p) => p.to_bytes(),
            Self::SubnetValidatorRegistration(p) => p.to_bytes(),
            Self::SubnetValidatorWeight(p) => p.to_bytes(),
        }
    }

    /// Parse a payload. Fails without partial output on any malformation.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let mut unpacker = Unpacker::new(bytes)?;
        unpacker.unpack_version()?;
        let payload = match unpacker.unpack_u32()? {
            SUBNET_CONVERSION_TYPE_ID => {
                Self::SubnetConversion(SubnetConversion::unpack(&mut unpacker)?)
            }
            REGISTER_SUBNET_VALIDATOR_TYPE_ID => {
                Self::RegisterSubnetValidator(RegisterSubnetValidator::unpack(&mut unpacker)?)
            }
            SUBNET_VALIDATOR_REGISTRATION_TYPE_ID => Self::SubnetValidatorRegistration(
                SubnetValidatorRegistration::unpack(&mut unpacker)?,
            ),
            SUBNET_VALIDATOR_WEIGHT_TYPE_ID => {
                Self::SubnetValidatorWeight(SubnetValidatorWeight::unpack(&mut unpacker)?)
            }
            type_id => {
                return Err(DecodeError::UnknownType {
                    kind: "payload",
                    type_id,
                })
            }
        };
        unpacker.finish()?;
        Ok(payload)
    }

    /// Pretty JSON rendering for logs.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| format!("<unrenderable: {e}>"))
    }
}

impl From<RegisterSubnetValidator> for Payload {
    fn from(p: RegisterSubnetValidator) -> Self {
        Self::RegisterSubnetValidator(p)
    }
}

impl From<SubnetValidatorRegistration> for Payload {
    fn from(p: SubnetValidatorRegistration) -> Self {
        Self::SubnetValidatorRegistration(p)
    }
}

impl From<SubnetValidatorWeight> for Payload {
    fn from(p: SubnetValidatorWeight) -> Self {
        Self::SubnetValidatorWeight(p)
    }
}

impl From<SubnetConversion> for Payload {
    fn from(p: SubnetConversion) -> Self {
        Self::SubnetConversion(p)
    }
}

fn serialize_hex<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
}

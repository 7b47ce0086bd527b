//! # Domain Entities
//!
//! Inputs and in-flight state of one validator registration.

use shared_crypto::{BlsPublicKey, BlsSignature, PUBLIC_KEY_LEN};
use shared_types::{Id, NetworkId, NodeId};

use super::errors::WarpError;
use super::message::Message;
use super::payload::{PChainOwner, RegisterSubnetValidator};
use super::signature::BitSetSignature;
use super::unsigned_message::UnsignedMessage;
use super::value_objects::RegistrationState;

/// One signer's share of an aggregate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureContribution {
    /// Bitset position the signer asserts.
    pub claimed_index: usize,
    /// Signer's key, checked against the committee.
    pub public_key: BlsPublicKey,
    /// Signature over the unsigned-message bytes.
    pub signature: BlsSignature,
}

/// Everything needed to build a registration message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationParams {
    /// Network the message is valid on.
    pub network_id: NetworkId,
    /// Chain attesting the registration.
    pub source_chain_id: Id,
    /// Addressed-call source address; empty for a chain-level call.
    pub source_address: Vec<u8>,
    /// Subnet the validator joins.
    pub subnet_id: Id,
    /// Node being registered.
    pub node_id: NodeId,
    /// Node's compressed BLS key.
    pub bls_public_key: [u8; PUBLIC_KEY_LEN],
    /// Unix timestamp after which the request is void.
    pub expiry: u64,
    /// Owner of the leftover balance.
    pub remaining_balance_owner: PChainOwner,
    /// Owner allowed to disable the validator.
    pub disable_owner: PChainOwner,
    /// Stake weight.
    pub weight: u64,
}

impl RegistrationParams {
    /// The payload these parameters describe.
    pub fn payload(&self) -> RegisterSubnetValidator {
        RegisterSubnetValidator {
            subnet_id: self.subnet_id,
            node_id: self.node_id,
            bls_public_key: self.bls_public_key,
            expiry: self.expiry,
            remaining_balance_owner: self.remaining_balance_owner.clone(),
            disable_owner: self.disable_owner.clone(),
            weight: self.weight,
        }
    }
}

/// A registration moving through its lifecycle.
///
/// Identity and content are fixed at construction; only the signed message
/// and the state advance.
#[derive(Clone, Debug)]
pub struct Registration {
    validation_id: Id,
    payload: RegisterSubnetValidator,
    unsigned: UnsignedMessage,
    message: Option<Message>,
    state: RegistrationState,
}

impl Registration {
    /// A freshly built, unsigned registration.
    pub fn pending(
        validation_id: Id,
        payload: RegisterSubnetValidator,
        unsigned: UnsignedMessage,
    ) -> Self {
        Self {
            validation_id,
            payload,
            unsigned,
            message: None,
            state: RegistrationState::Pending,
        }
    }

    /// Durable handle for this validator.
    pub fn validation_id(&self) -> Id {
        self.validation_id
    }

    /// The attested payload.
    pub fn payload(&self) -> &RegisterSubnetValidator {
        &self.payload
    }

    /// Bytes every signer signs.
    pub fn unsigned(&self) -> &UnsignedMessage {
        &self.unsigned
    }

    /// Current state.
    pub fn state(&self) -> RegistrationState {
        self.state
    }

    /// Signed message, once attached.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// Seal with a signature. Only valid from `Pending`.
    pub fn attach_signature(&mut self, signature: BitSetSignature) -> Result<&Message, WarpError> {
        if !self.state.can_transition_to(RegistrationState::Signed) {
            return Err(self.invalid(RegistrationState::Signed));
        }
        let message = Message::try_new(self.unsigned.clone(), signature)?;
        self.advance(RegistrationState::Signed)?;
        Ok(self.message.insert(message))
    }

    /// Record a lifecycle step owned by an external collaborator.
    ///
    /// `Signed` is reachable only through [`Self::attach_signature`].
    pub fn transition_to(&mut self, next: RegistrationState) -> Result<(), WarpError> {
        if next == RegistrationState::Signed {
            return Err(self.invalid(next));
        }
        self.advance(next)
    }

    fn advance(&mut self, next: RegistrationState) -> Result<(), WarpError> {
        if !self.state.can_transition_to(next) {
            return Err(self.invalid(next));
        }
        self.state = next;
        Ok(())
    }

    fn invalid(&self, next: RegistrationState) -> WarpError {
        WarpError::InvalidStateTransition {
            from: self.state.to_string(),
            to: next.to_string(),
        }
    }
}

//! # Registration Pipeline
//!
//! payload → addressed call → unsigned message, then sign → aggregate →
//! signed message. Each step is a pure function returning a typed result;
//! the caller decides whether a failure aborts or retries.

use std::sync::Arc;

use shared_crypto::BlsSecretKey;
use shared_types::{Id, NetworkId};
use tracing::{debug, info};

use super::collector::SignatureCollector;
use super::signing::contribute;
use super::validation_id::derive_validation_id;
use crate::domain::addressed_call::wrap;
use crate::domain::{
    Committee, DecodeError, Message, PayloadBody, Registration, RegistrationParams,
    SubnetValidatorRegistration, SubnetValidatorWeight, UnsignedMessage, WarpError,
    MAX_MESSAGE_SIZE, MIN_BIT_SET_SIGNATURE_LEN,
};

/// Wrap an encoded payload and bind it to a network and chain.
///
/// Room for the smallest bit-set signature is reserved under
/// [`MAX_MESSAGE_SIZE`] so the signed blob still decodes.
pub fn build_unsigned(
    network_id: NetworkId,
    source_chain_id: Id,
    source_address: &[u8],
    payload_bytes: &[u8],
) -> Result<UnsignedMessage, WarpError> {
    let call = wrap(source_address, payload_bytes);
    let unsigned = UnsignedMessage::build(network_id, source_chain_id, call);
    let max = MAX_MESSAGE_SIZE - MIN_BIT_SET_SIGNATURE_LEN;
    if unsigned.bytes().len() > max {
        return Err(DecodeError::TooLarge {
            size: unsigned.bytes().len(),
            max,
        }
        .into());
    }
    Ok(unsigned)
}

/// Build the pending registration for `params`.
pub fn build_registration(params: &RegistrationParams) -> Result<Registration, WarpError> {
    let payload = params.payload();
    let payload_bytes = payload.to_bytes();
    let validation_id = derive_validation_id(&payload);
    debug!(
        payload_len = payload_bytes.len(),
        %validation_id,
        "Encoded RegisterSubnetValidator payload"
    );

    let unsigned = build_unsigned(
        params.network_id,
        params.source_chain_id,
        &params.source_address,
        &payload_bytes,
    )?;
    info!(
        %validation_id,
        message_id = %unsigned.id(),
        node_id = %params.node_id,
        weight = params.weight,
        "Built registration message"
    );
    Ok(Registration::pending(validation_id, payload, unsigned))
}

/// Sign a pending registration with one committee member's key.
///
/// The signer's bitset position comes from `committee`; an absent key fails
/// with a committee mismatch.
pub fn sign_registration<'a>(
    registration: &'a mut Registration,
    secret_key: &BlsSecretKey,
    committee: Arc<Committee>,
) -> Result<&'a Message, WarpError> {
    let contribution = contribute(secret_key, registration.unsigned(), &committee)?;
    let collector =
        SignatureCollector::collect(committee, registration.unsigned().clone(), [contribution])?;
    let signature = collector.finish()?;
    registration.attach_signature(signature)
}

/// Unsigned message reporting a validation's registration status.
pub fn registration_status_message(
    network_id: NetworkId,
    source_chain_id: Id,
    validation_id: Id,
    registered: bool,
) -> Result<UnsignedMessage, WarpError> {
    let payload = SubnetValidatorRegistration {
        validation_id,
        registered,
    };
    build_unsigned(network_id, source_chain_id, &[], &payload.to_bytes())
}

/// Unsigned message setting a validation's weight; zero removes it.
pub fn weight_update_message(
    network_id: NetworkId,
    source_chain_id: Id,
    source_address: &[u8],
    validation_id: Id,
    nonce: u64,
    weight: u64,
) -> Result<UnsignedMessage, WarpError> {
    let payload = SubnetValidatorWeight {
        validation_id,
        nonce,
        weight,
    };
    build_unsigned(network_id, source_chain_id, source_address, &payload.to_bytes())
}

//! # Validation ID
//!
//! Durable handle for a registration: SHA-256 of the canonical
//! `RegisterSubnetValidator` encoding. The encoding is a pure function of the
//! ordered field tuple plus a constant tag, so equal tuples give equal IDs
//! and any field change (expiry included) gives a different one.

use shared_crypto::sha256;
use shared_types::Id;

use crate::domain::{PayloadBody, RegisterSubnetValidator};

/// Derive the validation ID of a registration payload.
pub fn derive_validation_id(payload: &RegisterSubnetValidator) -> Id {
    Id::new(sha256(&payload.to_bytes()))
}

//! # Algorithms Module
//!
//! Validation ID derivation, signing, signature collection and the
//! registration pipeline.

pub mod collector;
pub mod registration;
pub mod signing;
pub mod validation_id;

pub use collector::SignatureCollector;
pub use registration::{
    build_registration, build_unsigned, registration_status_message, sign_registration,
    weight_update_message,
};
pub use signing::{aggregate, attach_bitset, contribute, finalize, sign};
pub use validation_id::derive_validation_id;

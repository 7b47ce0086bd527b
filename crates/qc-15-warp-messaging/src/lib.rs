//! # QC-15 Warp Messaging
//!
//! Cross-chain attestation messages signed with BLS bit-set signatures.
//!
//! **Subsystem ID:** 15
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Let one chain prove to another that a committee attested a fact, here
//! "register this validator with this key and weight on this subnet":
//! - Typed, versioned payloads wrapped in an addressed call
//! - One canonical unsigned message that every signer signs
//! - Independent signer contributions folded into one aggregate plus bitset
//! - Validation IDs as the durable handle across the validator lifecycle
//!
//! ## Data Flow
//!
//! ```text
//! payload → addressed call → unsigned message
//!        → (per signer) sign → collect/aggregate → signed message
//!        → transaction issuer
//! ```
//!
//! ## Security Properties
//!
//! | Defense | Description |
//! |---------|-------------|
//! | Canonical bytes | Signatures cover the exact encoding, never a re-encoding |
//! | Strict decoding | Truncation, overlong prefixes and trailing bytes are rejected |
//! | Committee lookup | Bitset index resolved from the signer's key, never assumed |
//! | Epoch binding | Collectors refuse contributions from another committee snapshot |
//! | Proof of possession | Rogue-key safe public-key aggregation |
//!
//! ## Module Structure
//!
//! ```text
//! qc-15-warp-messaging/
//! ├── domain/          # codec, payloads, messages, committee, errors
//! ├── algorithms/      # validation ID, signing, collector, pipeline
//! ├── ports/           # WarpMessagingApi, NodeInfoProvider, TransactionIssuer
//! ├── adapters/        # key providers, local node info, dry-run issuer
//! └── service.rs       # WarpMessagingService
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{dry_run_tx_id, DryRunIssuer, HexKeyProvider, LocalNodeInfoProvider, RawKeyProvider};
pub use algorithms::{
    aggregate, attach_bitset, build_registration, build_unsigned, contribute,
    derive_validation_id, finalize, registration_status_message, sign, sign_registration,
    weight_update_message, SignatureCollector,
};
pub use domain::{
    AddressedCall, BitSetSignature, Committee, CommitteeMember, CommitteeMismatch, DecodeError,
    HashPayload, Message, PChainOwner, Payload, PayloadBody, Quorum, RegisterSubnetValidator,
    Registration, RegistrationParams, RegistrationState, SignatureContribution, SignerBitset,
    SubnetConversion, SubnetValidatorRegistration, SubnetValidatorWeight, UnsignedMessage,
    WarpError, WarpPayload, WarpSignature, CODEC_VERSION, MAX_MESSAGE_SIZE,
    MIN_BIT_SET_SIGNATURE_LEN,
};
pub use ports::{
    KeyProvider, MockNodeInfoProvider, MockTransactionIssuer, NodeInfo, NodeInfoProvider,
    RegisterValidatorTx, TransactionIssuer, WarpMessagingApi,
};
pub use service::WarpMessagingService;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
